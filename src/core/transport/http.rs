//! HTTP transport implementation.
//!
//! - `POST|GET /tools/list` - discovery listing
//! - `POST /tools/call` - runs a tool and streams its events as NDJSON
//! - `GET /health`, `GET /` - liveness and server info
//!
//! A call that cannot be resolved to a tool is rejected with a JSON error
//! body and never produces events.

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bytes::Bytes;
use futures::StreamExt;
use http::{StatusCode, header};
use serde::Serialize;
use serde_json::Value;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, instrument};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::domains::tools::ProtocolError;

/// Content type of the event stream.
pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    server: McpServer,
}

// ============================================================================
// Errors
// ============================================================================

/// Rejected request, serialized as `{"detail": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ApiErrorBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorBody {
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiErrorBody {
                detail: detail.into(),
            },
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<ProtocolError> for ApiError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::MissingName => Self::bad_request(err.to_string()),
            ProtocolError::UnknownTool(_) => Self::not_found(err.to_string()),
        }
    }
}

// ============================================================================
// Transport
// ============================================================================

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        self.config.address()
    }

    /// Build the axum router for `server`.
    pub fn router(&self, server: McpServer) -> Router {
        let state = AppState { server };

        let mut app = Router::new()
            .route("/", get(root_handler))
            .route("/health", get(health_check))
            .route("/tools/list", get(list_tools).post(list_tools))
            .route("/tools/call", post(call_tool))
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        app
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let tool_count = server.dispatcher().registry().len();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!(
            "Ready - listening on {} ({} tools, CORS {})",
            addr, tool_count, cors_status
        );
        info!("  → Discovery: POST /tools/list");
        info!("  → Call:      POST /tools/call (NDJSON events)");
        info!("  → Health:    GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::serve("HTTP", e))?;

        Ok(())
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "list": "/tools/list",
            "call": "/tools/call",
            "health": "/health"
        },
        "tools": state.server.dispatcher().registry().tool_names()
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Discovery: every registered tool with its schemas.
#[instrument(skip_all)]
async fn list_tools(State(state): State<AppState>) -> impl IntoResponse {
    info!("Processing tools/list request");
    Json(serde_json::json!({ "tools": state.server.list_tools() }))
}

/// Resolve a call and stream its lifecycle events, one JSON object per line.
///
/// The body is read leniently: anything that is not a JSON object with a
/// string `name` counts as a missing name.
#[instrument(skip_all, fields(tool))]
async fn call_tool(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let name = request.get("name").and_then(Value::as_str);
    let arguments = request.get("arguments").cloned();

    let invocation = state.server.dispatcher().begin(name, arguments)?;
    tracing::Span::current().record("tool", invocation.tool_name());

    let lines = invocation
        .into_events()
        .map(|event| event.to_json_line().map(Bytes::from));

    Ok((
        [(header::CONTENT_TYPE, NDJSON_CONTENT_TYPE)],
        Body::from_stream(lines),
    )
        .into_response())
}
