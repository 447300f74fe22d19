// src/mcp/mod.rs
//! Model Context Protocol surface: tool definitions, argument decoding and
//! the JSON-RPC stdio loop.

pub mod dispatch;
pub mod errors;
pub mod schemas;
pub mod server;
pub mod tool_types;
pub mod tools;

pub use dispatch::McpMethod;
pub use schemas::{tool_definitions, ToolDefinition};
pub use server::{McpServer, PROTOCOL_VERSION};
pub use tools::{ToolContent, ToolRegistry, ToolResult};
