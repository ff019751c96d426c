//! STDIO transport implementation.
//!
//! Serves the tool registry as MCP tools over stdin/stdout.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run until the client closes stdin.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!(
            "{} ready on stdin/stdout with {} tools",
            server.name(),
            server.dispatcher().registry().len()
        );

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::start("STDIO", e))?;

        let reason = service
            .waiting()
            .await
            .map_err(|e| TransportError::serve("STDIO", e))?;

        info!("STDIO transport finished: {:?}", reason);
        Ok(())
    }
}
