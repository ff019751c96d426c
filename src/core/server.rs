//! MCP Server implementation and lifecycle management.
//!
//! The server owns the one registry and dispatcher built at startup. Both
//! transports call tools through that dispatcher, so discovery and
//! invocation behave the same over STDIO and HTTP.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use super::error::Result as ServerResult;
use crate::domains::support::{SupportDb, seed_demo_data};
use crate::domains::tools::{Dispatcher, ToolDescriptor, ToolRegistry, build_tool_router};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Resolves and runs tool calls.
    dispatcher: Arc<Dispatcher>,

    /// Tool router for the MCP transport.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Open the database and build the tool registry.
    ///
    /// Seeds demo data first when `database.seed_demo_data` is set.
    pub fn new(config: Config) -> ServerResult<Self> {
        let db = SupportDb::from_config(&config.database)?;
        info!("Using database at {}", db.path().display());

        if config.database.seed_demo_data {
            let inserted = seed_demo_data(&db)?;
            info!("Seeded {} demo customers", inserted);
        }

        let registry = ToolRegistry::with_default_tools()?;
        Ok(Self::from_parts(config, registry, db))
    }

    /// Assemble a server from an already built registry and database.
    pub fn from_parts(config: Config, registry: ToolRegistry, db: SupportDb) -> Self {
        let dispatcher = Arc::new(Dispatcher::new(Arc::new(registry), Arc::new(db)));
        Self {
            config: Arc::new(config),
            tool_router: build_tool_router::<Self>(dispatcher.clone()),
            dispatcher,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// The dispatcher shared by all transports.
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Discovery listing, in registration order.
    pub fn list_tools(&self) -> Vec<ToolDescriptor<'_>> {
        self.dispatcher.registry().descriptors()
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Customer support tools: look up, list and update customers, \
                 open tickets and read a customer's ticket history."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name().to_string(),
                version: self.version().to_string(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domains::support::store::tests::temp_db;
    use tempfile::TempDir;

    /// Server over a fresh temporary database with the default tools.
    pub(crate) fn test_server() -> (TempDir, McpServer) {
        let (dir, db) = temp_db();
        let mut config = Config::default();
        config.database.path = db.path().to_path_buf();
        let registry = ToolRegistry::with_default_tools().unwrap();
        (dir, McpServer::from_parts(config, registry, db))
    }

    #[test]
    fn test_list_tools_in_registration_order() {
        let (_dir, server) = test_server();
        let names: Vec<_> = server.list_tools().iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "get_customer",
                "list_customers",
                "update_customer",
                "create_ticket",
                "get_customer_history",
            ]
        );
    }

    #[test]
    fn test_new_seeds_when_configured() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.database.path = dir.path().join("seeded.db");
        config.database.seed_demo_data = true;

        let server = McpServer::new(config).unwrap();
        let events = tokio_test::block_on(
            server
                .dispatcher()
                .call("get_customer", serde_json::json!({ "customer_id": 1 })),
        )
        .unwrap();
        let output = events[1].output.as_ref().unwrap();
        assert_eq!(output["id"], 1);
    }

    #[test]
    fn test_tool_router_serves_every_registered_tool() {
        let (_dir, server) = test_server();
        let routed: Vec<_> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        let registered: Vec<_> = server.list_tools().iter().map(|t| t.name.to_string()).collect();
        assert_eq!(routed.len(), registered.len());
        for name in &registered {
            assert!(routed.contains(name));
        }
    }

    #[test]
    fn test_get_info_enables_tools_only() {
        let (_dir, server) = test_server();
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
        assert_eq!(info.server_info.name, "support-mcp-server");
    }
}
