//! Type definitions for todo-mcp

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a task, always derived from `completed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Active,
    Completed,
}

impl TaskStatus {
    pub fn from_completed(completed: bool) -> Self {
        if completed {
            TaskStatus::Completed
        } else {
            TaskStatus::Active
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Active => "active",
            TaskStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status reported by a mutating operation.
/// `Deleted` only ever appears in the result of a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Active,
    Completed,
    Deleted,
}

impl From<TaskStatus> for ResultStatus {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Active => ResultStatus::Active,
            TaskStatus::Completed => ResultStatus::Completed,
        }
    }
}

/// Filter for listing tasks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    /// Parse a filter, case-insensitively.
    ///
    /// Missing, `all` and unrecognized values all mean [`StatusFilter::All`],
    /// so a model that invents a filter word still gets a useful listing.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("active") => StatusFilter::Active,
            Some("completed") => StatusFilter::Completed,
            _ => StatusFilter::All,
        }
    }

    /// The `completed` value to match, or None for every task
    pub fn completed(&self) -> Option<bool> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Active => Some(false),
            StatusFilter::Completed => Some(true),
        }
    }
}

/// Full task record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn status(&self) -> TaskStatus {
        TaskStatus::from_completed(self.completed)
    }
}

/// Result of add, complete, update and delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaskResult {
    pub task_id: i64,
    pub status: ResultStatus,
    pub title: String,
}

/// One row of a task listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaskSummary {
    pub task_id: i64,
    pub status: TaskStatus,
    pub title: String,
}

impl From<&Task> for TaskSummary {
    fn from(task: &Task) -> Self {
        Self {
            task_id: task.id,
            status: task.status(),
            title: task.title.clone(),
        }
    }
}

/// Response for list_tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaskListResponse {
    pub tasks: Vec<TaskSummary>,
}

/// A field change that knows whether it was requested at all
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Keep,
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, Patch::Set(_))
    }

    pub fn as_ref(&self) -> Patch<&T> {
        match self {
            Patch::Keep => Patch::Keep,
            Patch::Set(value) => Patch::Set(value),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Patch::Set(v),
            None => Patch::Keep,
        }
    }
}

/// Changes requested by update_task.
/// `description: Set(None)` clears the description; `Keep` leaves it alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Patch<String>,
    pub description: Patch<Option<String>>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        !self.title.is_set() && !self.description.is_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_derived_from_completed() {
        assert_eq!(TaskStatus::from_completed(false), TaskStatus::Active);
        assert_eq!(TaskStatus::from_completed(true), TaskStatus::Completed);
        assert_eq!(ResultStatus::from(TaskStatus::Completed), ResultStatus::Completed);
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!(StatusFilter::parse(None), StatusFilter::All);
        assert_eq!(StatusFilter::parse(Some("all")), StatusFilter::All);
        assert_eq!(StatusFilter::parse(Some("Active")), StatusFilter::Active);
        assert_eq!(StatusFilter::parse(Some(" COMPLETED ")), StatusFilter::Completed);
        // unrecognized values list everything
        assert_eq!(StatusFilter::parse(Some("pending")), StatusFilter::All);
        assert_eq!(StatusFilter::parse(Some("pending")).completed(), None);
    }

    #[test]
    fn test_result_status_serializes_lowercase() {
        let result = TaskResult {
            task_id: 1,
            status: ResultStatus::Deleted,
            title: "Buy milk".into(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"task_id": 1, "status": "deleted", "title": "Buy milk"})
        );
    }

    #[test]
    fn test_patch_from_option() {
        assert_eq!(Patch::from(Some(3)), Patch::Set(3));
        assert_eq!(Patch::<i32>::from(None), Patch::Keep);
        assert!(TaskPatch::default().is_empty());
    }
}
