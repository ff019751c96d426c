//! Update customer tool definition.
//!
//! Applies a partial update restricted to `name`, `email`, `phone` and
//! `status`. Keys outside that set are dropped before anything is written.

use rmcp::handler::server::tool::cached_schema_for_type;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::domains::support::{Customer, CustomerChanges, SupportDb};
use crate::domains::tools::definitions::common::{empty_record, parse_arguments, to_output};
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::registry::ToolDefinition;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the update customer tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateCustomerParams {
    /// Id of the customer to update.
    pub customer_id: i64,

    /// Fields to change. Only name, email, phone and status are applied.
    pub data: CustomerChanges,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Update customer tool - changes allow-listed customer fields.
pub struct UpdateCustomerTool;

impl UpdateCustomerTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "update_customer";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Update fields of a customer record.";

    /// Message returned when `data` holds no recognized field.
    pub const NO_FIELDS: &'static str = "No valid fields to update.";

    /// Execute the tool logic.
    ///
    /// Returns `None` when the customer does not exist; nothing is written in
    /// that case.
    #[instrument(skip_all, fields(customer_id = params.customer_id))]
    pub fn execute(params: &UpdateCustomerParams, db: &SupportDb) -> ToolResult<Option<Customer>> {
        if params.data.is_empty() {
            warn!("Update rejected: no recognized fields");
            return Err(ToolError::validation(Self::NO_FIELDS));
        }

        info!("Update customer tool called");
        Ok(db.update_customer(params.customer_id, &params.data)?)
    }

    /// Operation bound in the registry.
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
            cached_schema_for_type::<UpdateCustomerParams>(),
            cached_schema_for_type::<Customer>(),
            Self::handler,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
