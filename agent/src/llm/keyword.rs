//! Offline planner built on the keyword classifier

use async_trait::async_trait;
use regex::Regex;
use serde_json::{json, Map, Value};
use std::sync::LazyLock;
use todo_mcp::{ToolDescriptor, TodoResult};

use super::{Plan, ToolPlanner};
use crate::intent::{classify, Intent};

pub const HELP_TEXT: &str = "I can manage your todo list. Try \"add buy milk\", \
\"show all\", \"complete 3\", \"delete 3\" or \"update 3 to buy bread\".";

/// Words that select the active filter. Checked before the completed words
/// because "incomplete" contains "complete".
const ACTIVE_WORDS: [&str; 5] = ["incomplete", "active", "pending", "open", "remaining"];
const COMPLETED_WORDS: [&str; 3] = ["completed", "done", "finished"];

/// Planner that needs no model: classify, then pull arguments out with regexes
#[derive(Debug, Default, Clone)]
pub struct KeywordPlanner;

impl KeywordPlanner {
    pub fn new() -> Self {
        Self
    }

    /// Build a plan synchronously; the async trait method just wraps this
    pub fn plan_message(&self, message: &str) -> Plan {
        let intent = classify(message);
        tracing::debug!(intent = intent.as_str(), "classified message");

        let Some(kind) = intent.tool() else {
            return Plan::Reply(HELP_TEXT.to_string());
        };

        let mut arguments = Map::new();
        match intent {
            Intent::AddTask => {
                arguments.insert("title".into(), json!(extract_title(message)));
            }
            Intent::ListTasks => {
                if let Some(status) = extract_status(message) {
                    arguments.insert("status".into(), json!(status));
                }
            }
            Intent::CompleteTask | Intent::DeleteTask => {
                if let Some(id) = extract_task_id(message) {
                    arguments.insert("task_id".into(), json!(id));
                }
            }
            Intent::UpdateTask => {
                if let Some(id) = extract_task_id(message) {
                    arguments.insert("task_id".into(), json!(id));
                }
                if let Some(title) = extract_new_title(message) {
                    arguments.insert("title".into(), json!(title));
                }
            }
            Intent::Unknown => {}
        }

        Plan::Call {
            tool: kind.name().to_string(),
            arguments: Value::Object(arguments),
        }
    }
}

#[async_trait]
impl ToolPlanner for KeywordPlanner {
    async fn plan(&self, message: &str, _tools: &[ToolDescriptor]) -> TodoResult<Plan> {
        Ok(self.plan_message(message))
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

static ADD_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:please\s+)?(?:(?:add|create|new)\b\s*)?(?:an?\s+)?(?:new\s+)?(?:task\b\s*)?(?:(?:called|named|to)\b|:)?\s*",
    )
    .expect("Invalid add prefix regex")
});

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d+)\b").expect("Invalid number regex"));

static NEW_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bto\s+(.+)$").expect("Invalid title regex"));

fn clean(text: &str) -> String {
    text.trim()
        .trim_matches(['"', '\''])
        .trim_end_matches(['.', '!'])
        .trim()
        .to_string()
}

/// Strip the command words off an add request
pub fn extract_title(message: &str) -> String {
    clean(&ADD_PREFIX.replace(message, ""))
}

pub fn extract_status(message: &str) -> Option<&'static str> {
    let lower = message.to_lowercase();
    if ACTIVE_WORDS.iter().any(|w| lower.contains(w)) {
        Some("active")
    } else if COMPLETED_WORDS.iter().any(|w| lower.contains(w)) {
        Some("completed")
    } else {
        None
    }
}

pub fn extract_task_id(message: &str) -> Option<i64> {
    FIRST_NUMBER
        .captures(message)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// The text after "to" in "update 3 to buy bread"
pub fn extract_new_title(message: &str) -> Option<String> {
    NEW_TITLE
        .captures(message)
        .and_then(|c| c.get(1))
        .map(|m| clean(m.as_str()))
        .filter(|t| !t.is_empty())
}
