//! Tools domain module.
//!
//! Tools are the named operations clients call. Each call goes through the
//! [`Dispatcher`], which resolves the name against the [`ToolRegistry`] and
//! reports progress as a `start → (result | error) → end` event lifecycle.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `registry.rs` - Frozen name → definition table, in discovery order
//! - `dispatcher.rs` - Call resolution and the event lifecycle
//! - `router.rs` - rmcp ToolRouter for the STDIO transport
//! - `error.rs` - Tool and protocol error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with params, `execute()` and `definition()`
//! 2. Export it from `definitions/mod.rs`
//! 3. Register it in `ToolRegistry::with_default_tools()`
//!
//! Both transports pick it up from the registry.

pub mod definitions;
mod dispatcher;
mod error;
mod registry;
pub mod router;

pub use dispatcher::{Dispatcher, EventKind, Invocation, ToolEvent};
pub use error::{ProtocolError, ToolError, ToolResult};
pub use registry::{ToolDefinition, ToolDescriptor, ToolHandler, ToolRegistry, ToolRegistryBuilder};
pub use router::build_tool_router;
