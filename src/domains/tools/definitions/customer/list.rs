//! List customers tool definition.

use rmcp::handler::server::tool::cached_schema_for_type;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::domains::support::{Customer, CustomerStatus, SupportDb};
use crate::domains::tools::definitions::common::{default_limit, parse_arguments, to_output};
use crate::domains::tools::error::ToolResult;
use crate::domains::tools::registry::ToolDefinition;

/// Parameters for the list customers tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListCustomersParams {
    /// Only customers with this status are returned.
    #[serde(default)]
    pub status: CustomerStatus,

    /// Maximum number of customers to return.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for ListCustomersParams {
    fn default() -> Self {
        Self {
            status: CustomerStatus::default(),
            limit: default_limit(),
        }
    }
}

/// List customers tool - newest customers with a given status.
pub struct ListCustomersTool;

impl ListCustomersTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_customers";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List customers by status with an optional limit.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(status = %params.status, limit = params.limit))]
    pub fn execute(params: &ListCustomersParams, db: &SupportDb) -> ToolResult<Vec<Customer>> {
        info!("List customers tool called");
        Ok(db.list_customers(params.status, params.limit)?)
    }

    /// Operation bound in the registry.
    pub fn handler(arguments: Value, db: &SupportDb) -> ToolResult<Value> {
        let params = parse_arguments(arguments)?;
        to_output(&Self::execute(&params, db)?)
    }

    /// Registry entry for this tool.
    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(
            Self::NAME,
            Self::DESCRIPTION,
            cached_schema_for_type::<ListCustomersParams>(),
            cached_schema_for_type::<Vec<Customer>>(),
            Self::handler,
        )
    }
}
