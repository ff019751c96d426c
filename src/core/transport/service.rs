//! Starts whichever transport the configuration selects.

use tracing::{error, info};

use super::{TransportConfig, TransportResult};
use crate::core::McpServer;

#[cfg(feature = "stdio")]
use super::stdio::StdioTransport;

#[cfg(feature = "http")]
use super::http::HttpTransport;

/// Runs one transport for the lifetime of the process.
pub struct TransportService {
    config: TransportConfig,
}

impl TransportService {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Serve `server` until the transport shuts down or fails.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let transport = self.config.description();
        info!("Starting transport: {}", transport);

        let outcome = match self.config {
            #[cfg(feature = "stdio")]
            TransportConfig::Stdio => StdioTransport::run(server).await,
            #[cfg(feature = "http")]
            TransportConfig::Http(cfg) => HttpTransport::new(cfg).run(server).await,
        };

        if let Err(e) = &outcome {
            error!("{} failed: {}", transport, e);
        }
        outcome
    }
}
