use crate::error::CoreResult;
use crate::storage::{Store, TableData, TableKind};

/// Lists user tables in the store's creation order.
pub fn list_tables(store: &Store) -> CoreResult<Vec<String>> {
    store.table_names()
}

/// Column names of `table`, in the store's natural order.
/// Fails with `TableNotFound` for unknown tables.
pub fn columns(store: &Store, table: &str) -> CoreResult<Vec<String>> {
    Ok(store.select_all(table)?.headers)
}

/// All rows currently stored in `table`, aligned to its columns.
pub fn rows(store: &Store, table: &str) -> CoreResult<TableData> {
    store.select_all(table)
}

pub fn rows_of(store: &Store, kind: TableKind) -> CoreResult<TableData> {
    store.select_all(kind.name())
}
