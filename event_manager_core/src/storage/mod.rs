pub mod schema;
pub mod store;

// Re-export main types for convenience
pub use schema::{KeyKind, TableDescriptor, TableKind};
pub use store::{Store, TableData};
