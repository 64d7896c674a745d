use std::path::{Path, PathBuf};

pub mod config;
pub mod console;
pub mod engine;
pub mod error;
pub mod prompt;
pub mod storage;
pub mod types;

use engine::keys::{lookup_keys, KeySet};
use engine::roster::{event_roster, Roster};
use engine::{inspect, writer, NewRecord};
use error::CoreResult;
use storage::{Store, TableData, TableKind};

pub use config::Config;
pub use error::{CoreError, ERROR_MARKER};

/// Handle to the event store: one connection for the life of the process.
#[derive(Debug)]
pub struct Database {
    path: Option<PathBuf>,
    store: Store,
}

impl Database {
    /// Opens (or creates) the store at `path` and ensures the tables exist.
    pub fn open(path: impl Into<PathBuf>) -> CoreResult<Self> {
        let path = path.into();
        let store = Store::open(&path)?;
        Ok(Self {
            path: Some(path),
            store,
        })
    }

    pub fn open_in_memory() -> CoreResult<Self> {
        Ok(Self {
            path: None,
            store: Store::open_in_memory()?,
        })
    }

    /// Closes the connection. Dropping the handle also releases it, but only
    /// this reports close errors.
    pub fn close(self) -> CoreResult<()> {
        self.store.close()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn list_tables(&self) -> CoreResult<Vec<String>> {
        inspect::list_tables(&self.store)
    }

    pub fn columns(&self, table: &str) -> CoreResult<Vec<String>> {
        inspect::columns(&self.store, table)
    }

    pub fn rows(&self, table: &str) -> CoreResult<TableData> {
        inspect::rows(&self.store, table)
    }

    /// Keys the operator addresses rows of `kind` by.
    pub fn keys(&self, kind: TableKind) -> CoreResult<KeySet> {
        lookup_keys(&self.store, kind)
    }

    pub fn next_key(&self, kind: TableKind) -> CoreResult<String> {
        engine::next_key(&self.store, kind)
    }

    pub fn insert(&self, record: &NewRecord) -> CoreResult<String> {
        writer::insert(&self.store, record)
    }

    pub fn update_field(&self, kind: TableKind, key: &str, column: &str, value: &str) -> CoreResult<usize> {
        writer::update_field(&self.store, kind, key, column, value)
    }

    pub fn delete(&self, kind: TableKind, key: &str) -> CoreResult<usize> {
        writer::delete(&self.store, kind, key)
    }

    pub fn roster(&self, event_name: &str) -> CoreResult<Option<Roster>> {
        event_roster(&self.store, event_name)
    }
}
