//! Transport error types.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Failures of a transport while starting or serving.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP listener could not bind its address.
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The transport never reached its serving state.
    #[error("{transport} transport failed to start: {message}")]
    Start {
        transport: &'static str,
        message: String,
    },

    /// The transport stopped with an error after it was serving.
    #[error("{transport} transport stopped: {message}")]
    Serve {
        transport: &'static str,
        message: String,
    },
}

impl TransportError {
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::Bind {
            address: address.into(),
            source,
        }
    }

    pub fn start(transport: &'static str, message: impl ToString) -> Self {
        Self::Start {
            transport,
            message: message.to_string(),
        }
    }

    pub fn serve(transport: &'static str, message: impl ToString) -> Self {
        Self::Serve {
            transport,
            message: message.to_string(),
        }
    }
}
