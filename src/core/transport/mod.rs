//! Transport layer for the MCP server.
//!
//! - **HTTP**: discovery plus NDJSON-streamed tool calls - feature: `http`
//! - **STDIO**: MCP over standard input/output - feature: `stdio`
//!
//! Both delegate tool calls to the server's dispatcher. HTTP is the default
//! transport when compiled in.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "http")]
pub use config::HttpConfig;
