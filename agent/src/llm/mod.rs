//! Language-model abstraction layer
//!
//! A planner looks at one chat message plus the tool table and decides
//! whether to call a tool or just answer. It never touches storage itself.

mod keyword;
mod openai;

pub use keyword::KeywordPlanner;
pub use openai::{OpenAiPlanner, DEFAULT_OPENAI_URL};

use async_trait::async_trait;
use serde_json::Value;
use todo_mcp::{ToolDescriptor, TodoResult};

/// What the planner wants done with a message
#[derive(Debug, Clone, PartialEq)]
pub enum Plan {
    /// Invoke a tool. The name is not trusted; dispatch validates it.
    Call { tool: String, arguments: Value },
    /// Answer directly without touching any tool
    Reply(String),
}

/// Trait for planner backends
#[async_trait]
pub trait ToolPlanner: Send + Sync {
    /// Decide how to handle `message` given the available tools
    async fn plan(&self, message: &str, tools: &[ToolDescriptor]) -> TodoResult<Plan>;

    /// Short backend name for logs and the health endpoint
    fn name(&self) -> &str;
}
