//! Parameter definitions for todo-mcp tools

use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{TodoError, TodoResult};
use crate::registry::ToolKind;
use crate::types::{Patch, StatusFilter, TaskPatch};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddTaskParams {
    /// ID of the user creating the task
    pub user_id: String,
    /// Title of the task
    pub title: String,
    /// Description of the task
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListTasksParams {
    /// ID of the user whose tasks to list
    pub user_id: String,
    /// Filter by status (all, active, completed)
    #[serde(default)]
    pub status: Option<String>,
}

impl ListTasksParams {
    pub fn filter(&self) -> StatusFilter {
        StatusFilter::parse(self.status.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CompleteTaskParams {
    /// ID of the user
    pub user_id: String,
    /// ID of the task to complete
    pub task_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DeleteTaskParams {
    /// ID of the user
    pub user_id: String,
    /// ID of the task to delete
    pub task_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UpdateTaskParams {
    /// ID of the user
    pub user_id: String,
    /// ID of the task to update
    pub task_id: i64,
    /// New title for the task
    #[serde(default)]
    pub title: Option<String>,
    /// New description for the task; `null` clears it
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<String>")]
    pub description: Option<Option<String>>,
}

impl UpdateTaskParams {
    /// Absent fields become `Keep`; an explicit `null` description becomes `Set(None)`
    pub fn patch(&self) -> TaskPatch {
        TaskPatch {
            title: Patch::from(self.title.clone()),
            description: Patch::from(self.description.clone()),
        }
    }
}

/// Distinguish a present-but-null field from an absent one.
/// Paired with `#[serde(default)]`, absent stays `None` and `null` becomes `Some(None)`.
pub fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// A parsed tool invocation, one variant per operation
#[derive(Debug, Clone)]
pub enum ToolCall {
    AddTask(AddTaskParams),
    ListTasks(ListTasksParams),
    CompleteTask(CompleteTaskParams),
    DeleteTask(DeleteTaskParams),
    UpdateTask(UpdateTaskParams),
}

impl ToolCall {
    /// Resolve a tool name and validate its arguments.
    ///
    /// `null` arguments are treated as an empty object. Required fields must
    /// be present and non-null before type checking happens.
    pub fn parse(name: &str, arguments: Value) -> TodoResult<Self> {
        let kind =
            ToolKind::from_name(name).ok_or_else(|| TodoError::UnknownTool(name.to_string()))?;

        let arguments = match arguments {
            Value::Null => Value::Object(Default::default()),
            Value::Object(map) => Value::Object(map),
            other => {
                return Err(TodoError::validation(format!(
                    "Arguments must be a JSON object, got {}",
                    other
                )))
            }
        };

        for field in kind.descriptor().required_fields() {
            if arguments.get(field).map_or(true, Value::is_null) {
                return Err(TodoError::validation(format!(
                    "Missing required argument: {}",
                    field
                )));
            }
        }

        Ok(match kind {
            ToolKind::AddTask => ToolCall::AddTask(decode(kind, arguments)?),
            ToolKind::ListTasks => ToolCall::ListTasks(decode(kind, arguments)?),
            ToolKind::CompleteTask => ToolCall::CompleteTask(decode(kind, arguments)?),
            ToolKind::DeleteTask => ToolCall::DeleteTask(decode(kind, arguments)?),
            ToolKind::UpdateTask => ToolCall::UpdateTask(decode(kind, arguments)?),
        })
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            ToolCall::AddTask(_) => ToolKind::AddTask,
            ToolCall::ListTasks(_) => ToolKind::ListTasks,
            ToolCall::CompleteTask(_) => ToolKind::CompleteTask,
            ToolCall::DeleteTask(_) => ToolKind::DeleteTask,
            ToolCall::UpdateTask(_) => ToolKind::UpdateTask,
        }
    }

    pub fn user_id(&self) -> &str {
        match self {
            ToolCall::AddTask(p) => &p.user_id,
            ToolCall::ListTasks(p) => &p.user_id,
            ToolCall::CompleteTask(p) => &p.user_id,
            ToolCall::DeleteTask(p) => &p.user_id,
            ToolCall::UpdateTask(p) => &p.user_id,
        }
    }
}

fn decode<T: DeserializeOwned>(kind: ToolKind, arguments: Value) -> TodoResult<T> {
    serde_json::from_value(arguments)
        .map_err(|e| TodoError::validation(format!("Invalid arguments for {}: {}", kind, e)))
}
