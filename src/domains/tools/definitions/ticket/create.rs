//! Create ticket tool definition.
//!
//! Opens a new support ticket. The customer id is stored as given; whether a
//! customer with that id exists is not checked.

use rmcp::handler::server::tool::cached_schema_for_type;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::domains::support::{NewTicket, SupportDb, Ticket, TicketPriority};
use crate::domains::tools::definitions::common::{parse_arguments, to_output};
use crate::domains::tools::error::ToolResult;
use crate::domains::tools::registry::ToolDefinition;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the create ticket tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateTicketParams {
    /// Id of the customer filing the ticket.
    pub customer_id: i64,

    /// Free-text description of the problem.
    pub issue: String,

    /// Ticket priority.
    #[serde(default)]
    pub priority: TicketPriority,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Create ticket tool - inserts an open ticket.
pub struct CreateTicketTool;

impl CreateTicketTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "create_ticket";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Create a new support ticket for a customer.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(customer_id = params.customer_id, priority = %params.priority))]
    pub fn execute(params: &CreateTicketParams, db: &SupportDb) -> ToolResult<Ticket> {
        info!("Create ticket tool called");
        let ticket = db.insert_ticket(&NewTicket::open(
            params.customer_id,
            params.issue.clone(),
            params.priority,
        ))?;
        info!("Created ticket {}", ticket.id);
        Ok(ticket)
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
            cached_schema_for_type::<CreateTicketParams>(),
            cached_schema_for_type::<Ticket>(),
            Self::handler,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
