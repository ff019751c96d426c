//! Tool-specific error types.

use thiserror::Error;

use crate::domains::support::DbError;

/// Result type returned by tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors raised while a resolved tool runs.
///
/// These never reach the client as a failed request: the dispatcher turns
/// them into an `error` event between `start` and `end`.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Arguments were missing, mistyped or outside an allowed set.
    #[error("{0}")]
    Validation(String),

    /// The database gateway failed.
    #[error(transparent)]
    Database(#[from] DbError),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Database(_) => "database",
            Self::Internal(_) => "internal",
        }
    }
}

/// Errors that reject a call before any event is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// The request did not name a tool.
    #[error("Missing 'name' in request body.")]
    MissingName,

    /// No tool is registered under this name.
    #[error("Unknown tool '{0}'.")]
    UnknownTool(String),
}

impl ProtocolError {
    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = ToolError::validation("No valid fields to update.");
        assert_eq!(err.to_string(), "No valid fields to update.");
        assert_eq!(err.kind(), "validation");
    }

    #[test]
    fn test_protocol_messages() {
        assert_eq!(
            ProtocolError::MissingName.to_string(),
            "Missing 'name' in request body."
        );
        assert_eq!(
            ProtocolError::unknown_tool("delete_customer").to_string(),
            "Unknown tool 'delete_customer'."
        );
    }
}
