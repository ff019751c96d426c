//! Tool Registry - central registration of all tools.
//!
//! The registry is built once at startup through [`ToolRegistryBuilder`] and
//! is read-only afterwards. It provides:
//! - Lookup of a tool definition by name
//! - The ordered tool list used for discovery
//! - rmcp `Tool` metadata for the MCP transports

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::definitions::{
    CreateTicketTool, GetCustomerHistoryTool, GetCustomerTool, ListCustomersTool,
    UpdateCustomerTool,
};
use super::error::{ProtocolError, ToolResult};
use crate::core::{Error, Result};
use crate::domains::support::SupportDb;

/// Operation bound to a tool: raw arguments in, JSON record out.
pub type ToolHandler = fn(Value, &SupportDb) -> ToolResult<Value>;

// ============================================================================
// Tool Definition
// ============================================================================

/// A registered tool: metadata plus the operation it runs.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: &'static str,

    /// Description shown to clients.
    pub description: &'static str,

    /// JSON Schema of the accepted arguments.
    pub input_schema: Arc<JsonObject>,

    /// JSON Schema of the produced record.
    pub output_schema: Arc<JsonObject>,

    handler: ToolHandler,
}

impl ToolDefinition {
    pub fn new(
        name: &'static str,
        description: &'static str,
        input_schema: Arc<JsonObject>,
        output_schema: Arc<JsonObject>,
        handler: ToolHandler,
    ) -> Self {
        Self {
            name,
            description,
            input_schema,
            output_schema,
            handler,
        }
    }

    /// Run the bound operation.
    pub fn call(&self, arguments: Value, db: &SupportDb) -> ToolResult<Value> {
        (self.handler)(arguments, db)
    }

    /// Discovery entry for this tool.
    pub fn descriptor(&self) -> ToolDescriptor<'_> {
        ToolDescriptor {
            name: self.name,
            description: self.description,
            input_schema: &self.input_schema,
            output_schema: &self.output_schema,
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.into(),
            description: Some(self.description.into()),
            input_schema: self.input_schema.clone(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

/// Serialized form of a tool in the discovery listing.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub input_schema: &'a JsonObject,
    pub output_schema: &'a JsonObject,
}

// ============================================================================
// Tool Registry
// ============================================================================

/// Immutable name → definition mapping, in registration order.
#[derive(Debug)]
pub struct ToolRegistry {
    tools: Vec<Arc<ToolDefinition>>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// Start building a registry.
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// Registry holding the five support tools.
    ///
    /// This is the central place where all tools are registered.
    /// When adding a new tool, add it here.
    pub fn with_default_tools() -> Result<Self> {
        let registry = Self::builder()
            .register(GetCustomerTool::definition())?
            .register(ListCustomersTool::definition())?
            .register(UpdateCustomerTool::definition())?
            .register(CreateTicketTool::definition())?
            .register(GetCustomerHistoryTool::definition())?
            .build();
        info!("Registered {} tools", registry.len());
        Ok(registry)
    }

    /// Find a tool by name.
    pub fn lookup(&self, name: &str) -> std::result::Result<&Arc<ToolDefinition>, ProtocolError> {
        self.index
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| ProtocolError::unknown_tool(name))
    }

    /// All tools in registration order.
    pub fn list(&self) -> &[Arc<ToolDefinition>] {
        &self.tools
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name).collect()
    }

    /// Discovery listing in registration order.
    pub fn descriptors(&self) -> Vec<ToolDescriptor<'_>> {
        self.tools.iter().map(|t| t.descriptor()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Collects definitions and rejects duplicate names.
#[derive(Debug, Default)]
pub struct ToolRegistryBuilder {
    tools: Vec<Arc<ToolDefinition>>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistryBuilder {
    /// Add a definition. Fails if the name is already taken.
    pub fn register(mut self, definition: ToolDefinition) -> Result<Self> {
        if self.index.contains_key(definition.name) {
            return Err(Error::config(format!(
                "Duplicate tool name '{}'",
                definition.name
            )));
        }
        debug!("Registering tool: {}", definition.name);
        self.index.insert(definition.name, self.tools.len());
        self.tools.push(Arc::new(definition));
        Ok(self)
    }

    /// Freeze the registry.
    pub fn build(self) -> ToolRegistry {
        ToolRegistry {
            tools: self.tools,
            index: self.index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn noop(_: Value, _: &SupportDb) -> ToolResult<Value> {
        Ok(json!({}))
    }

    fn definition(name: &'static str) -> ToolDefinition {
        ToolDefinition::new(
            name,
            "test tool",
            Arc::new(JsonObject::new()),
            Arc::new(JsonObject::new()),
            noop,
        )
    }

    #[test]
    fn test_registry_tool_names_in_order() {
        let registry = ToolRegistry::with_default_tools().unwrap();
        assert_eq!(
            registry.tool_names(),
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
    fn test_lookup_known_and_unknown() {
        let registry = ToolRegistry::with_default_tools().unwrap();
        let tool = registry.lookup("create_ticket").unwrap();
        assert_eq!(tool.name, "create_ticket");
        assert_eq!(tool.description, "Create a new support ticket for a customer.");

        let err = registry.lookup("delete_customer").unwrap_err();
        assert_eq!(err, ProtocolError::unknown_tool("delete_customer"));
    }

    #[test]
    fn test_duplicate_name_fails_at_build_time() {
        let result = ToolRegistry::builder()
            .register(definition("echo"))
            .unwrap()
            .register(definition("echo"));
        match result {
            Err(Error::Config(msg)) => assert!(msg.contains("echo")),
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_registration_order() {
        let registry = ToolRegistry::builder()
            .register(definition("b"))
            .unwrap()
            .register(definition("a"))
            .unwrap()
            .build();
        assert_eq!(registry.tool_names(), vec!["b", "a"]);
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_descriptors_carry_schemas() {
        let registry = ToolRegistry::with_default_tools().unwrap();
        let listing = serde_json::to_value(registry.descriptors()).unwrap();
        let entries = listing.as_array().unwrap();
        assert_eq!(entries.len(), 5);

        for (entry, tool) in entries.iter().zip(registry.list()) {
            assert_eq!(entry["name"], tool.name);
            assert_eq!(entry["description"], tool.description);
            assert_eq!(entry["input_schema"], Value::Object((*tool.input_schema).clone()));
            assert_eq!(entry["output_schema"], Value::Object((*tool.output_schema).clone()));
        }

        let get_customer = &entries[0]["input_schema"];
        assert!(
            get_customer["required"]
                .as_array()
                .unwrap()
                .contains(&json!("customer_id"))
        );
    }

    #[test]
    fn test_to_tool_metadata() {
        let registry = ToolRegistry::with_default_tools().unwrap();
        let tool = registry.lookup("list_customers").unwrap().to_tool();
        assert_eq!(tool.name, "list_customers");
        assert!(tool.description.is_some());
    }
}
