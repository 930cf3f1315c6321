//! Helpers for building and reading `CallToolResult` envelopes
//!
//! Every tool in this workspace answers with the same envelope: one text item
//! for humans, an optional structured payload for programs, and an error flag.

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;

/// Build a tool result envelope.
///
/// `structured` lands in `structured_content` so clients that understand
/// structured output don't have to re-parse the text.
///
/// ```rust,ignore
/// use mcp_common::envelope;
///
/// let result = envelope("Added task with ID: 1", Some(json!({"task_id": 1})), false);
/// ```
pub fn envelope(text: impl Into<String>, structured: Option<Value>, is_error: bool) -> CallToolResult {
    let content = vec![Content::text(text.into())];
    let mut result = if is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    };
    result.structured_content = structured;
    result
}

/// Whether the result was flagged as a tool-level error
pub fn is_error(result: &CallToolResult) -> bool {
    result.is_error.unwrap_or(false)
}

/// Concatenate the text items of a result, one per line
pub fn result_text(result: &CallToolResult) -> String {
    result
        .content
        .iter()
        .filter_map(|c| c.as_text().map(|t| t.text.clone()))
        .collect::<Vec<_>>()
        .join("\n")
}
