//! Startup errors for the MCP server.
//!
//! Tool failures never reach this type: the dispatcher reports them as
//! `error` events, and transports report their own [`TransportError`].
//!
//! [`TransportError`]: crate::core::transport::TransportError

use thiserror::Error;

use crate::domains::support::DbError;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop the server from being assembled.
#[derive(Debug, Error)]
pub enum Error {
    /// Database could not be opened, initialized or seeded.
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// The tool set is inconsistent, e.g. two tools share a name.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
