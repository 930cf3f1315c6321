//! MCP Common - Shared plumbing for the todo MCP servers
//!
//! - **Initialization**: [`init_tracing`] for stderr logging (stdout belongs to the protocol)
//! - **Results**: helpers for building and reading `CallToolResult` envelopes
//! - **Embeddable**: [`EmbeddableMcp`] trait for in-process tool execution
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::{envelope, EmbeddableMcp};
//!
//! let result = server.call_tool("list_tasks", serde_json::json!({"user_id": "u1"})).await?;
//! println!("{}", mcp_common::result_text(&result));
//! ```

pub mod embeddable;
pub mod init;
pub mod result;

// Re-export commonly used items at crate root
pub use embeddable::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use init::init_tracing;
pub use result::{envelope, is_error, result_text};

// Re-export rmcp types that are commonly needed
pub use rmcp::model::CallToolResult;

// Re-export async_trait for implementing EmbeddableMcp
pub use async_trait::async_trait;
