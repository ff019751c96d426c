//! Customer Support MCP Server Library
//!
//! Exposes customer and ticket operations over a SQLite database as tools
//! that can be discovered and invoked over HTTP (NDJSON event streams) or
//! MCP over STDIO.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **support**: customer and ticket persistence
//!   - **tools**: the tool registry, dispatcher and tool definitions
//!
//! # Example
//!
//! ```rust,no_run
//! use support_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
