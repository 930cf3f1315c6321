//! Tool dispatch
//!
//! Converts a named call into a repository operation and wraps the outcome in
//! a [`ToolResponse`]. Dispatch is total: every error, from an unknown name
//! to a database failure, comes back as an envelope with `is_error = true`.

use rmcp::model::CallToolResult;
use serde::Serialize;
use serde_json::Value;

use crate::error::{TodoError, TodoResult};
use crate::params::ToolCall;
use crate::repository::TaskRepository;
use crate::types::TaskListResponse;

/// Uniform tool response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResponse {
    pub content: String,
    pub structured_result: Option<Value>,
    pub is_error: bool,
}

impl ToolResponse {
    fn success<T: Serialize>(content: String, result: &T) -> TodoResult<Self> {
        let structured = serde_json::to_value(result)
            .map_err(|e| TodoError::upstream(format!("Failed to encode result: {}", e)))?;
        Ok(Self {
            content,
            structured_result: Some(structured),
            is_error: false,
        })
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            structured_result: None,
            is_error: true,
        }
    }

    pub fn into_call_tool_result(self) -> CallToolResult {
        mcp_common::envelope(self.content, self.structured_result, self.is_error)
    }
}

/// Dispatch a call by tool name with raw JSON arguments
pub fn dispatch(repo: &TaskRepository, name: &str, arguments: Value) -> ToolResponse {
    match ToolCall::parse(name, arguments) {
        Ok(call) => execute(repo, call),
        Err(err @ TodoError::UnknownTool(_)) => {
            tracing::warn!("{}", err);
            ToolResponse::error(err.to_string())
        }
        Err(err) => {
            tracing::warn!(tool = name, "rejected arguments: {}", err);
            ToolResponse::error(format!("Error executing tool {}: {}", name, err))
        }
    }
}

/// Run an already parsed call
pub fn execute(repo: &TaskRepository, call: ToolCall) -> ToolResponse {
    let kind = call.kind();
    tracing::debug!(tool = kind.name(), user_id = call.user_id(), "executing tool");

    match run(repo, call) {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(tool = kind.name(), "tool failed: {}", err);
            ToolResponse::error(format!("Error executing tool {}: {}", kind, err))
        }
    }
}

fn run(repo: &TaskRepository, call: ToolCall) -> TodoResult<ToolResponse> {
    match call {
        ToolCall::AddTask(p) => {
            let result = repo.add(&p.user_id, &p.title, p.description.as_deref())?;
            ToolResponse::success(format!("Added task with ID: {}", result.task_id), &result)
        }
        ToolCall::ListTasks(p) => {
            let tasks = repo.list(&p.user_id, p.filter())?;
            let response = TaskListResponse { tasks };
            ToolResponse::success(format!("Found {} tasks", response.tasks.len()), &response)
        }
        ToolCall::CompleteTask(p) => {
            let result = repo.complete(&p.user_id, p.task_id)?;
            ToolResponse::success(format!("Completed task with ID: {}", result.task_id), &result)
        }
        ToolCall::DeleteTask(p) => {
            let result = repo.delete(&p.user_id, p.task_id)?;
            ToolResponse::success(format!("Deleted task with ID: {}", result.task_id), &result)
        }
        ToolCall::UpdateTask(p) => {
            let result = repo.update(&p.user_id, p.task_id, p.patch())?;
            ToolResponse::success(format!("Updated task with ID: {}", result.task_id), &result)
        }
    }
}
