//! Customer history tool definition.
//!
//! Returns a customer together with every ticket they have filed.

use rmcp::handler::server::tool::cached_schema_for_type;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::domains::support::{CustomerHistory, SupportDb};
use crate::domains::tools::definitions::common::{parse_arguments, to_output};
use crate::domains::tools::error::ToolResult;
use crate::domains::tools::registry::ToolDefinition;

/// Parameters for the customer history tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetCustomerHistoryParams {
    /// Id of the customer whose history is requested.
    pub customer_id: i64,
}

/// Customer history tool - a customer and their tickets, newest first.
pub struct GetCustomerHistoryTool;

impl GetCustomerHistoryTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_customer_history";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get a customer and all of their tickets.";

    /// Execute the tool logic.
    ///
    /// An unknown customer gives `{customer: null, tickets: []}`; tickets are
    /// not looked up in that case.
    #[instrument(skip_all, fields(customer_id = params.customer_id))]
    pub fn execute(params: &GetCustomerHistoryParams, db: &SupportDb) -> ToolResult<CustomerHistory> {
        info!("Customer history tool called");

        let Some(customer) = db.get_customer(params.customer_id)? else {
            debug!("No customer with id {}", params.customer_id);
            return Ok(CustomerHistory::default());
        };

        let tickets = db.tickets_for_customer(customer.id)?;
        Ok(CustomerHistory {
            customer: Some(customer),
            tickets,
        })
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
            cached_schema_for_type::<GetCustomerHistoryParams>(),
            cached_schema_for_type::<CustomerHistory>(),
            Self::handler,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::support::store::tests::{at, temp_db};
    use crate::domains::support::{NewCustomer, NewTicket, TicketPriority};
    use serde_json::json;

    #[test]
    fn test_missing_customer_gives_null_and_no_tickets() {
        let (_dir, db) = temp_db();
        // tickets filed against an id that has no customer row are not reported
        db.insert_ticket(&NewTicket::open(999, "orphan", TicketPriority::Low))
            .unwrap();

        let output = GetCustomerHistoryTool::handler(json!({ "customer_id": 999 }), &db).unwrap();
        assert_eq!(output, json!({ "customer": null, "tickets": [] }));
    }

    #[test]
    fn test_history_lists_tickets_newest_first() {
        let (_dir, db) = temp_db();
        let ana = db.insert_customer(&NewCustomer::new("Ana")).unwrap();
        let bob = db.insert_customer(&NewCustomer::new("Bob")).unwrap();

        for (day, issue) in [(1, "oldest"), (9, "newest"), (4, "middle")] {
            let mut ticket = NewTicket::open(ana.id, issue, TicketPriority::Medium);
            ticket.created_at = Some(at(day));
            db.insert_ticket(&ticket).unwrap();
        }
        db.insert_ticket(&NewTicket::open(bob.id, "not ana's", TicketPriority::High))
            .unwrap();

        let output = GetCustomerHistoryTool::handler(json!({ "customer_id": ana.id }), &db).unwrap();
        assert_eq!(output["customer"]["name"], "Ana");

        let issues: Vec<_> = output["tickets"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["issue"].as_str().unwrap())
            .collect();
        assert_eq!(issues, vec!["newest", "middle", "oldest"]);
    }

    #[test]
    fn test_customer_without_tickets() {
        let (_dir, db) = temp_db();
        let ana = db.insert_customer(&NewCustomer::new("Ana")).unwrap();

        let history = GetCustomerHistoryTool::execute(
            &GetCustomerHistoryParams { customer_id: ana.id },
            &db,
        )
        .unwrap();
        assert_eq!(history.customer, Some(ana));
        assert!(history.tickets.is_empty());
    }
}
