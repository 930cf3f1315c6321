//! Todo MCP Library
//!
//! Per-user task management exposed as MCP tools.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use todo_mcp::{dispatch, Database, TaskRepository};
//!
//! let repo = TaskRepository::new(Database::connect("sqlite://todo.db")?);
//! let response = dispatch(&repo, "add_task", json!({"user_id": "u1", "title": "Buy milk"}));
//! assert!(!response.is_error);
//! ```
//!
//! - One SQLite database holds tasks, conversations and messages
//! - Task status is derived from the `completed` flag, never stored
//! - Dispatch never fails: errors come back as `is_error` envelopes

pub mod db;
pub mod error;
pub mod handlers;
pub mod params;
pub mod registry;
pub mod repository;
pub mod schema;
pub mod server;
#[cfg(test)]
mod tests;
pub mod types;

pub use db::Database;
pub use error::{TodoError, TodoResult};
pub use handlers::{dispatch, execute, ToolResponse};
pub use registry::{ToolDescriptor, ToolKind, TOOLS};
pub use repository::TaskRepository;
pub use server::TodoMcpServer;

// Re-export parameter types for direct API usage
pub use params::*;
