//! Keyword intent classifier
//!
//! Keyword sets are checked in a fixed order and the first set with any hit
//! wins. Matching is by substring on the lower-cased message, so "tasks"
//! hits `task` and "call" hits `all`. A message like "add this to my list"
//! is an add, never a list.

use todo_mcp::ToolKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    AddTask,
    ListTasks,
    CompleteTask,
    DeleteTask,
    UpdateTask,
    Unknown,
}

const RULES: [(Intent, &[&str]); 5] = [
    (Intent::AddTask, &["add", "create", "new", "task"]),
    (Intent::ListTasks, &["list", "show", "view", "all"]),
    (Intent::CompleteTask, &["complete", "done", "finish"]),
    (Intent::DeleteTask, &["delete", "remove"]),
    (Intent::UpdateTask, &["update", "change", "modify"]),
];

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self.tool() {
            Some(kind) => kind.name(),
            None => "unknown",
        }
    }

    /// The tool this intent routes to
    pub fn tool(&self) -> Option<ToolKind> {
        match self {
            Intent::AddTask => Some(ToolKind::AddTask),
            Intent::ListTasks => Some(ToolKind::ListTasks),
            Intent::CompleteTask => Some(ToolKind::CompleteTask),
            Intent::DeleteTask => Some(ToolKind::DeleteTask),
            Intent::UpdateTask => Some(ToolKind::UpdateTask),
            Intent::Unknown => None,
        }
    }
}

/// Classify free text into an intent
pub fn classify(text: &str) -> Intent {
    let lower = text.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::Unknown)
}
