//! OpenAI-compatible function-calling planner

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use todo_mcp::{ToolDescriptor, TodoError, TodoResult};

use super::{Plan, ToolPlanner};

pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";

const SYSTEM_PROMPT: &str = "You manage the user's todo list. Use the provided tools for \
any request to add, list, complete, update or delete tasks. The user_id argument is filled \
in for you; pass an empty string. Reply in plain text when no tool fits.";

/// Planner backed by a chat-completions endpoint
pub struct OpenAiPlanner {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiPlanner {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_OPENAI_URL.to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Point at another OpenAI-compatible server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body(&self, message: &str, tools: &[ToolDescriptor]) -> Value {
        let tools: Vec<Value> = tools
            .iter()
            .map(|t| {
                json!({
                    "type": "function",
                    "function": {
                        "name": t.name(),
                        "description": t.description,
                        "parameters": t.input_schema(),
                    }
                })
            })
            .collect();

        json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": message},
            ],
            "tools": tools,
            "tool_choice": "auto",
        })
    }
}

#[async_trait]
impl ToolPlanner for OpenAiPlanner {
    async fn plan(&self, message: &str, tools: &[ToolDescriptor]) -> TodoResult<Plan> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = self.request_body(message, tools);

        tracing::debug!(model = %self.model, "requesting tool plan");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TodoError::upstream(format!("Language model request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TodoError::upstream(format!(
                "Language model error (status {}): {}",
                status, error_text
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            TodoError::upstream(format!("Failed to parse language model response: {}", e))
        })?;

        parse_response(&response_json)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

/// Turn a chat-completions response into a plan.
/// Only the first tool call is used; one message maps to one operation.
pub fn parse_response(response: &Value) -> TodoResult<Plan> {
    let message = response["choices"]
        .get(0)
        .map(|choice| &choice["message"])
        .ok_or_else(|| TodoError::upstream("Language model returned no choices"))?;

    if let Some(call) = message["tool_calls"].get(0) {
        let function = &call["function"];
        let tool = function["name"]
            .as_str()
            .ok_or_else(|| TodoError::upstream("Tool call without a function name"))?
            .to_string();

        // arguments arrive as a JSON-encoded string
        let arguments = match &function["arguments"] {
            Value::String(raw) if raw.trim().is_empty() => json!({}),
            Value::String(raw) => serde_json::from_str(raw).map_err(|e| {
                TodoError::upstream(format!("Invalid tool arguments from language model: {}", e))
            })?,
            Value::Null => json!({}),
            other => other.clone(),
        };

        return Ok(Plan::Call { tool, arguments });
    }

    let text = message["content"].as_str().unwrap_or_default().trim();
    if text.is_empty() {
        return Err(TodoError::upstream("Language model returned an empty reply"));
    }
    Ok(Plan::Reply(text.to_string()))
}
