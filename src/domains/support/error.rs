//! Persistence error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for persistence operations.
pub type DbResult<T> = Result<T, DbError>;

/// Errors raised by the support database gateway.
#[derive(Debug, Error)]
pub enum DbError {
    /// The database file could not be opened.
    #[error("Failed to open database at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The database directory could not be prepared.
    #[error("Failed to prepare database directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A statement failed.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl DbError {
    /// Create an open error.
    pub fn open(path: impl Into<PathBuf>, source: rusqlite::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }
}

/// A string column held a value outside its allowed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} must be one of: {allowed}")]
pub struct InvalidEnumValue {
    pub field: &'static str,
    pub allowed: &'static str,
}
