use std::path::Path;

use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::storage::schema::{TableKind, KEY_SEQUENCE_DDL, KEY_SEQUENCE_TABLE};
use crate::types::value::Value;
use crate::types::Row;

/// Column headers plus every row of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

/// The single process-wide connection to the SQLite store.
#[derive(Debug)]
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (or creates) the store file and bootstraps the schema.
    pub fn open(path: &Path) -> CoreResult<Self> {
        let conn = Connection::open(path)?;
        debug!(path = %path.display(), "opened store");
        let store = Self { conn };
        store.bootstrap()?;
        Ok(store)
    }

    pub fn open_in_memory() -> CoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        debug!("opened in-memory store");
        let store = Self { conn };
        store.bootstrap()?;
        Ok(store)
    }

    /// Releases the connection, surfacing any close error.
    pub fn close(self) -> CoreResult<()> {
        self.conn.close().map_err(|(_, e)| CoreError::StoreFailure(e))
    }

    fn bootstrap(&self) -> CoreResult<()> {
        self.conn.execute_batch(KEY_SEQUENCE_DDL)?;
        for kind in TableKind::ALL {
            let desc = kind.descriptor();
            self.conn.execute_batch(desc.ddl)?;
            self.conn.execute_batch(&desc.key_sequence_trigger())?;
        }
        Ok(())
    }

    /// User tables in creation order.
    pub fn table_names(&self) -> CoreResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master WHERE type='table' \
             AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' \
             AND name NOT LIKE '\\_%' ESCAPE '\\' ORDER BY rowid",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    pub fn table_exists(&self, name: &str) -> CoreResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Reads every row of a table that is known to exist.
    pub fn select_all(&self, table: &str) -> CoreResult<TableData> {
        if !self.table_exists(table)? {
            return Err(CoreError::TableNotFound(table.to_string()));
        }
        let sql = format!("SELECT * FROM {}", quote_ident(table));
        self.select(&sql, &[])
    }

    /// Runs a read statement and collects headers and rows.
    pub fn select(&self, sql: &str, args: &[Value]) -> CoreResult<TableData> {
        let mut stmt = self.conn.prepare(sql)?;
        let headers: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = headers.len();
        let rows = stmt
            .query_map(params_from_iter(args.iter()), |row| {
                let mut out: Row = Vec::with_capacity(width);
                for i in 0..width {
                    out.push(Value::from(row.get_ref(i)?));
                }
                Ok(out)
            })?
            .collect::<Result<Vec<_>, _>>()?;
        debug!(rows = rows.len(), sql, "select");
        Ok(TableData { headers, rows })
    }

    /// Runs one auto-committed write statement and returns the affected row count.
    pub fn execute(&self, sql: &str, args: &[Value]) -> CoreResult<usize> {
        debug!(sql, "execute");
        let changed = self.conn.execute(sql, params_from_iter(args.iter()))?;
        Ok(changed)
    }

    /// Highest identifier ever issued for `table`, if any.
    pub fn last_issued_key(&self, table: &str) -> CoreResult<Option<i64>> {
        let sql = format!("SELECT last_key FROM {KEY_SEQUENCE_TABLE} WHERE table_name = ?1");
        let last = self
            .conn
            .query_row(&sql, params![table], |row| row.get::<_, i64>(0))
            .optional()?;
        Ok(last)
    }
}

/// Quotes an identifier for interpolation into statement text.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
