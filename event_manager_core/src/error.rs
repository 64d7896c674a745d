use thiserror::Error;

/// Marker prefixed to every error line shown to the operator.
pub const ERROR_MARKER: &str = "!!!";

/// Errors raised by the CRUD engine.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Menu index out of range, non-numeric input, or an empty answer.
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// An identifier or column the operator named does not resolve.
    #[error("Unknown key: {0}")]
    UnknownKey(String),

    /// The operation depends on rows that do not exist yet.
    #[error("Missing prerequisite: {0}")]
    EmptyPrerequisite(String),

    /// The store rejected a statement.
    #[error("Store failure: {0}")]
    StoreFailure(#[from] rusqlite::Error),

    /// The requested table does not exist in the store.
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// An identifier column holds something that is not an integer.
    #[error("Identifier '{key}' in table '{table}' is not an integer")]
    NonNumericKey { table: String, key: String },

    #[error("Console I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file could not be read or parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CoreError {
    /// Operator-facing line, always starting with [`ERROR_MARKER`].
    pub fn report(&self) -> String {
        format!("{ERROR_MARKER} {self}")
    }

    /// Errors the menu loop recovers from by returning to the menu.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, CoreError::Io(_))
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
