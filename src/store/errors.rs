//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while opening or using the SQLite store
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite rejected or failed the statement. The engine's own message is
    /// what callers see.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// The database file or its directory could not be prepared
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    /// A previous holder of the connection panicked
    #[error("store connection lock poisoned")]
    Poisoned,

    /// The blocking worker running the statement did not complete
    #[error("store worker failed: {0}")]
    Worker(String),
}
