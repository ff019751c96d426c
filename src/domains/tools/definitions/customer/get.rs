//! Get customer tool definition.
//!
//! Point lookup of a single customer by id.

use rmcp::handler::server::tool::cached_schema_for_type;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::domains::support::{Customer, SupportDb};
use crate::domains::tools::definitions::common::{empty_record, parse_arguments, to_output};
use crate::domains::tools::error::ToolResult;
use crate::domains::tools::registry::ToolDefinition;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the get customer tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetCustomerParams {
    /// Id of the customer to fetch.
    pub customer_id: i64,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Get customer tool - fetches one customer record.
pub struct GetCustomerTool;

impl GetCustomerTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_customer";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get a single customer by id.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(customer_id = params.customer_id))]
    pub fn execute(params: &GetCustomerParams, db: &SupportDb) -> ToolResult<Option<Customer>> {
        info!("Get customer tool called");
        Ok(db.get_customer(params.customer_id)?)
    }

    /// Operation bound in the registry. An unknown id yields `{}`, not an error.
    pub fn handler(arguments: Value, db: &SupportDb) -> ToolResult<Value> {
        let params = parse_arguments(arguments)?;
        match Self::execute(&params, db)? {
            Some(customer) => to_output(&customer),
            None => Ok(empty_record()),
        }
    }

    /// Registry entry for this tool.
    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(
            Self::NAME,
            Self::DESCRIPTION,
            cached_schema_for_type::<GetCustomerParams>(),
            cached_schema_for_type::<Customer>(),
            Self::handler,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::support::NewCustomer;
    use crate::domains::support::store::tests::temp_db;
    use serde_json::json;

    #[test]
    fn test_get_existing_customer() {
        let (_dir, db) = temp_db();
        let created = db
            .insert_customer(&NewCustomer::new("Ana").email("ana@example.com"))
            .unwrap();

        let output = GetCustomerTool::handler(json!({ "customer_id": created.id }), &db).unwrap();
        assert_eq!(output["id"], created.id);
        assert_eq!(output["name"], "Ana");
        assert_eq!(output["email"], "ana@example.com");
        assert_eq!(output["status"], "active");
        assert!(output.get("created_at").is_some());
        assert!(output.get("updated_at").is_some());
    }

    #[test]
    fn test_get_missing_customer_is_empty_object() {
        let (_dir, db) = temp_db();
        let output = GetCustomerTool::handler(json!({ "customer_id": 999 }), &db).unwrap();
        assert_eq!(output, json!({}));
    }

    #[test]
    fn test_get_customer_requires_id() {
        let (_dir, db) = temp_db();
        assert!(GetCustomerTool::handler(json!({}), &db).is_err());
    }
}
