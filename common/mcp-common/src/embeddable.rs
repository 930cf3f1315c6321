//! Embeddable MCP trait for in-process execution
//!
//! The chat agent runs in the same process as the todo tools, so it calls
//! them through [`EmbeddableMcp`] instead of spawning the stdio server.
//!
//! ```rust,ignore
//! use mcp_common::EmbeddableMcp;
//! use todo_mcp::TodoMcpServer;
//!
//! let server = TodoMcpServer::new(db);
//! let result = server
//!     .call_tool("add_task", serde_json::json!({"user_id": "u1", "title": "Buy milk"}))
//!     .await?;
//! ```

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;

/// Error type for embeddable MCP operations
#[derive(Debug, thiserror::Error)]
pub enum EmbeddableError {
    /// Tool was not found in the server
    #[error("tool not found: {0}")]
    ToolNotFound(String),
}

/// Result type for embeddable MCP operations
pub type EmbeddableResult<T> = Result<T, EmbeddableError>;

/// Trait for MCP servers that can be executed in-process
///
/// Implementations must be `Send + Sync`; the HTTP layer shares one server
/// across all request tasks.
#[async_trait]
pub trait EmbeddableMcp: Send + Sync {
    /// Server name, matching the name used in MCP client configuration
    fn server_name(&self) -> &str;

    /// All available tools with their input schemas
    fn list_tools(&self) -> Vec<Tool>;

    /// Execute a tool by name.
    ///
    /// Tool-level failures are reported inside the returned result
    /// (`is_error = true`); `Err` is reserved for failures to reach the tool.
    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult>;

    /// Optional human description of the server
    fn server_description(&self) -> Option<&str> {
        None
    }
}
