pub mod flows;
pub mod format;
pub mod inspect;
pub mod keys;
pub mod roster;
pub mod writer;

pub use flows::Outcome;
pub use format::render;
pub use keys::{keys, next_key, KeySet};
pub use writer::{NewRecord, Person};
