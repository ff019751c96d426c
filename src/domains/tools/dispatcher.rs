//! Tool dispatcher - resolves a call and produces its event lifecycle.
//!
//! A call is handled in two steps:
//!
//! 1. [`Dispatcher::begin`] resolves the tool name. A missing or unknown name
//!    is a [`ProtocolError`] and no event is ever produced for it.
//! 2. The returned [`Invocation`] is turned into a stream of exactly three
//!    [`ToolEvent`]s: `start`, then `result` or `error`, then `end`.
//!
//! The operation only runs once the consumer has pulled the `start` event. It
//! runs on the blocking thread pool; any failure it reports, and any panic,
//! becomes the `error` event.

use std::sync::Arc;

use futures::{Stream, StreamExt, stream};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use super::error::ProtocolError;
use super::registry::{ToolDefinition, ToolRegistry};
use crate::domains::support::SupportDb;

// ============================================================================
// Events
// ============================================================================

/// Kind of a lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Start,
    Result,
    Error,
    End,
}

/// One event of an invocation, serialized as one JSON line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolEvent {
    pub event: EventKind,
    pub tool: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolEvent {
    fn new(event: EventKind, tool: impl Into<String>) -> Self {
        Self {
            event,
            tool: tool.into(),
            output: None,
            error: None,
        }
    }

    pub fn start(tool: impl Into<String>) -> Self {
        Self::new(EventKind::Start, tool)
    }

    pub fn result(tool: impl Into<String>, output: Value) -> Self {
        Self {
            output: Some(output),
            ..Self::new(EventKind::Result, tool)
        }
    }

    pub fn error(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::new(EventKind::Error, tool)
        }
    }

    pub fn end(tool: impl Into<String>) -> Self {
        Self::new(EventKind::End, tool)
    }

    /// Whether this is the `result` or `error` event.
    pub fn is_terminal_content(&self) -> bool {
        matches!(self.event, EventKind::Result | EventKind::Error)
    }

    /// Serialize as a newline-terminated JSON line.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Resolves tool calls against a frozen registry.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    db: Arc<SupportDb>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>, db: Arc<SupportDb>) -> Self {
        Self { registry, db }
    }

    /// The registry this dispatcher resolves against.
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Resolve a call.
    ///
    /// An empty name counts as missing. Missing or null arguments become an
    /// empty object.
    pub fn begin(
        &self,
        name: Option<&str>,
        arguments: Option<Value>,
    ) -> Result<Invocation, ProtocolError> {
        let name = name.filter(|n| !n.is_empty()).ok_or_else(|| {
            warn!("Rejected call without a tool name");
            ProtocolError::MissingName
        })?;

        let definition = self.registry.lookup(name).map_err(|e| {
            warn!("Unknown tool requested: {}", name);
            e
        })?;

        let arguments = match arguments {
            None | Some(Value::Null) => Value::Object(serde_json::Map::new()),
            Some(arguments) => arguments,
        };

        Ok(Invocation {
            definition: definition.clone(),
            arguments,
            db: self.db.clone(),
        })
    }

    /// Resolve and run a call, collecting all of its events.
    pub async fn call(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<Vec<ToolEvent>, ProtocolError> {
        Ok(self.begin(Some(name), Some(arguments))?.collect().await)
    }
}

// ============================================================================
// Invocation
// ============================================================================

/// A resolved call that has not produced any event yet.
#[derive(Debug)]
pub struct Invocation {
    definition: Arc<ToolDefinition>,
    arguments: Value,
    db: Arc<SupportDb>,
}

/// Position in the `start → (result | error) → end` lifecycle.
enum Stage {
    Idle(Invocation),
    Started(Invocation),
    Completed(&'static str),
    Ended,
}

impl Invocation {
    /// Name of the resolved tool.
    pub fn tool_name(&self) -> &'static str {
        self.definition.name
    }

    /// The lifecycle as a lazy stream of exactly three events.
    pub fn into_events(self) -> impl Stream<Item = ToolEvent> + Send + 'static {
        stream::unfold(Stage::Idle(self), |stage| async move {
            match stage {
                Stage::Idle(invocation) => {
                    info!("Tool call started: {}", invocation.tool_name());
                    let event = ToolEvent::start(invocation.tool_name());
                    Some((event, Stage::Started(invocation)))
                }
                Stage::Started(invocation) => {
                    let tool = invocation.tool_name();
                    let event = invocation.run().await;
                    Some((event, Stage::Completed(tool)))
                }
                Stage::Completed(tool) => {
                    info!("Tool call ended: {}", tool);
                    Some((ToolEvent::end(tool), Stage::Ended))
                }
                Stage::Ended => None,
            }
        })
    }

    /// Drive the lifecycle to completion.
    pub async fn collect(self) -> Vec<ToolEvent> {
        self.into_events().collect().await
    }

    /// Run the operation and turn its outcome into the content event.
    #[instrument(skip_all, fields(tool = self.definition.name))]
    async fn run(self) -> ToolEvent {
        let Self {
            definition,
            arguments,
            db,
        } = self;
        let tool = definition.name;

        match tokio::task::spawn_blocking(move || definition.call(arguments, &db)).await {
            Ok(Ok(output)) => ToolEvent::result(tool, output),
            Ok(Err(e)) => {
                warn!("Tool {} failed ({}): {}", tool, e.kind(), e);
                ToolEvent::error(tool, e.to_string())
            }
            Err(e) => {
                error!("Tool {} aborted: {}", tool, e);
                ToolEvent::error(tool, format!("Tool '{tool}' failed unexpectedly: {e}"))
            }
        }
    }
}
