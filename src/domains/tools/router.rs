//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Every registered tool gets a route for the MCP (STDIO) transport. A route
//! runs the call through the [`Dispatcher`] and folds the event lifecycle
//! into a single `CallToolResult`.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
    model::{CallToolResult, Content},
};
use serde_json::Value;
use tracing::warn;

use super::dispatcher::{Dispatcher, EventKind, ToolEvent};
use super::registry::ToolDefinition;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(dispatcher: Arc<Dispatcher>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    dispatcher
        .registry()
        .list()
        .iter()
        .fold(ToolRouter::new(), |router, definition| {
            router.with_route(create_route(definition, dispatcher.clone()))
        })
}

/// Create a ToolRoute that dispatches to `definition`.
fn create_route<S>(definition: &ToolDefinition, dispatcher: Arc<Dispatcher>) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    let name = definition.name;
    ToolRoute::new_dyn(definition.to_tool(), move |ctx: ToolCallContext<'_, S>| {
        let arguments = ctx.arguments.clone().map(Value::Object);
        let dispatcher = dispatcher.clone();
        async move {
            let invocation = dispatcher
                .begin(Some(name), arguments)
                .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
            Ok(into_call_result(invocation.collect().await))
        }
        .boxed()
    })
}

/// Fold an event lifecycle into an MCP tool result.
///
/// The `result` payload becomes JSON text content; an `error` event becomes an
/// error result carrying its message.
pub fn into_call_result(events: Vec<ToolEvent>) -> CallToolResult {
    let outcome = events.into_iter().find(ToolEvent::is_terminal_content);

    match outcome {
        Some(ToolEvent {
            event: EventKind::Result,
            output,
            ..
        }) => {
            let output = output.unwrap_or(Value::Null);
            match serde_json::to_string_pretty(&output) {
                Ok(text) => CallToolResult::success(vec![Content::text(text)]),
                Err(e) => CallToolResult::error(vec![Content::text(e.to_string())]),
            }
        }
        Some(ToolEvent { tool, error, .. }) => {
            let message = error.unwrap_or_else(|| format!("Tool '{tool}' failed"));
            CallToolResult::error(vec![Content::text(message)])
        }
        None => {
            warn!("Tool lifecycle ended without a result or error event");
            CallToolResult::error(vec![Content::text("Tool produced no outcome")])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::support::store::tests::temp_db;
    use crate::domains::tools::ToolRegistry;
    use serde_json::json;

    struct TestServer {}

    fn text(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_build_router() {
        let (_dir, db) = temp_db();
        let registry = Arc::new(ToolRegistry::with_default_tools().unwrap());
        let dispatcher = Arc::new(Dispatcher::new(registry.clone(), Arc::new(db)));

        let router: ToolRouter<TestServer> = build_tool_router(dispatcher);
        let tools = router.list_all();
        assert_eq!(tools.len(), registry.len());

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        for name in registry.tool_names() {
            assert!(names.contains(&name));
        }
    }

    #[test]
    fn test_result_event_becomes_success() {
        let events = vec![
            ToolEvent::start("get_customer"),
            ToolEvent::result("get_customer", json!({ "id": 1 })),
            ToolEvent::end("get_customer"),
        ];
        let result = into_call_result(events);

        assert_ne!(result.is_error, Some(true));
        let parsed: Value = serde_json::from_str(text(&result)).unwrap();
        assert_eq!(parsed, json!({ "id": 1 }));
    }

    #[test]
    fn test_error_event_becomes_error_result() {
        let events = vec![
            ToolEvent::start("update_customer"),
            ToolEvent::error("update_customer", "No valid fields to update."),
            ToolEvent::end("update_customer"),
        ];
        let result = into_call_result(events);

        assert_eq!(result.is_error, Some(true));
        assert_eq!(text(&result), "No valid fields to update.");
    }

    #[test]
    fn test_dispatch_through_lifecycle() {
        let (_dir, db) = temp_db();
        let registry = Arc::new(ToolRegistry::with_default_tools().unwrap());
        let dispatcher = Dispatcher::new(registry, Arc::new(db));

        let events = tokio_test::block_on(
            dispatcher
                .begin(Some("get_customer_history"), Some(json!({ "customer_id": 999 })))
                .unwrap()
                .collect(),
        );
        let result = into_call_result(events);
        let parsed: Value = serde_json::from_str(text(&result)).unwrap();
        assert_eq!(parsed, json!({ "customer": null, "tickets": [] }));
    }
}
