//! Core module containing shared infrastructure components.
//!
//! Error handling, configuration, the server handler and the transports.

pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use config::{Config, DatabaseConfig, LoggingConfig};
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
