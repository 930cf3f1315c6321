//! Chat orchestration
//!
//! One message in, one reply out: persist the user turn, let the planner pick
//! a tool, run it through the embedded todo server, format the envelope and
//! persist the assistant turn.

use mcp_common::{is_error, result_text, CallToolResult, EmbeddableMcp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use todo_mcp::{TodoError, TodoResult, TOOLS};

use crate::db::{ConversationStore, MessageRole};
use crate::llm::{Plan, ToolPlanner};

/// Reply returned to the chat client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub conversation_id: i64,
}

/// Coordinates planner, tools and conversation history
#[derive(Clone)]
pub struct ChatService {
    tools: Arc<dyn EmbeddableMcp>,
    planner: Arc<dyn ToolPlanner>,
    conversations: ConversationStore,
}

impl ChatService {
    pub fn new(
        tools: Arc<dyn EmbeddableMcp>,
        planner: Arc<dyn ToolPlanner>,
        conversations: ConversationStore,
    ) -> Self {
        Self {
            tools,
            planner,
            conversations,
        }
    }

    pub fn planner_name(&self) -> &str {
        self.planner.name()
    }

    pub fn conversations(&self) -> &ConversationStore {
        &self.conversations
    }

    /// Handle one chat message for `user_id`.
    ///
    /// Without a `conversation_id` the user's latest conversation continues,
    /// or a new one is started. The user
    /// message is stored before planning, so a planner failure still leaves
    /// it in the history.
    pub async fn handle(
        &self,
        user_id: &str,
        message: &str,
        conversation_id: Option<i64>,
    ) -> TodoResult<ChatReply> {
        if user_id.trim().is_empty() {
            return Err(TodoError::validation("user_id is required"));
        }
        let message = message.trim();
        if message.is_empty() {
            return Err(TodoError::validation("Message cannot be empty"));
        }

        let conversation = self
            .conversations
            .resolve_conversation(user_id, conversation_id)?;
        self.conversations
            .append_message(user_id, conversation.id, MessageRole::User, message)?;

        let plan = self.planner.plan(message, &TOOLS).await?;
        tracing::debug!(planner = self.planner.name(), ?plan, "planned message");

        let response = match plan {
            Plan::Reply(text) => text,
            Plan::Call { tool, arguments } => {
                let arguments = scope_to_user(arguments, user_id);
                let result = self
                    .tools
                    .call_tool(&tool, arguments)
                    .await
                    .map_err(|e| TodoError::upstream(format!("Tool call failed: {}", e)))?;
                format_result(&tool, &result)
            }
        };

        self.conversations
            .append_message(user_id, conversation.id, MessageRole::Assistant, &response)?;

        tracing::info!(
            user_id,
            conversation_id = conversation.id,
            "chat message handled"
        );

        Ok(ChatReply {
            response,
            conversation_id: conversation.id,
        })
    }
}

/// Force `user_id` to the caller. Non-object arguments are left alone so
/// dispatch can reject them.
fn scope_to_user(arguments: Value, user_id: &str) -> Value {
    match arguments {
        Value::Object(mut map) => {
            map.insert("user_id".to_string(), Value::String(user_id.to_string()));
            Value::Object(map)
        }
        Value::Null => serde_json::json!({ "user_id": user_id }),
        other => other,
    }
}

/// Render a tool envelope as chat text
pub fn format_result(tool: &str, result: &CallToolResult) -> String {
    let text = result_text(result);
    if is_error(result) {
        return format!("Sorry, I couldn't do that: {}", text);
    }

    let structured = result.structured_content.as_ref();

    if let Some(tasks) = structured.and_then(|s| s["tasks"].as_array()) {
        if tasks.is_empty() {
            return "You have no tasks.".to_string();
        }
        let mut lines = vec![format!("{}:", text)];
        for task in tasks {
            let mark = if task["status"] == "completed" { "x" } else { " " };
            lines.push(format!(
                "- [{}] #{} {}",
                mark,
                task["task_id"],
                task["title"].as_str().unwrap_or_default()
            ));
        }
        return lines.join("\n");
    }

    match structured.and_then(|s| s["title"].as_str()) {
        Some(title) => format!("{} ({})", text, title),
        None => {
            tracing::debug!(tool, "tool result without structured payload");
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::KeywordPlanner;
    use async_trait::async_trait;
    use serde_json::json;
    use todo_mcp::types::StatusFilter;
    use todo_mcp::{Database, TaskRepository, TodoMcpServer, ToolDescriptor};

    fn service_with(planner: Arc<dyn ToolPlanner>) -> ChatService {
        let db = Database::in_memory().unwrap();
        ChatService::new(
            Arc::new(TodoMcpServer::new(db.clone())),
            planner,
            ConversationStore::new(db),
        )
    }

    fn keyword_service() -> ChatService {
        service_with(Arc::new(KeywordPlanner::new()))
    }

    /// Planner that always returns the same plan
    struct FixedPlanner(Plan);

    #[async_trait]
    impl ToolPlanner for FixedPlanner {
        async fn plan(&self, _message: &str, _tools: &[ToolDescriptor]) -> TodoResult<Plan> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct FailingPlanner;

    #[async_trait]
    impl ToolPlanner for FailingPlanner {
        async fn plan(&self, _message: &str, _tools: &[ToolDescriptor]) -> TodoResult<Plan> {
            Err(TodoError::upstream("model unavailable"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_chat_flow() {
        let chat = keyword_service();

        let reply = chat.handle("alice", "add buy milk", None).await.unwrap();
        assert_eq!(reply.conversation_id, 1);
        assert_eq!(reply.response, "Added task with ID: 1 (buy milk)");

        let reply = chat.handle("alice", "show all", Some(1)).await.unwrap();
        assert_eq!(reply.response, "Found 1 tasks:\n- [ ] #1 buy milk");

        let reply = chat.handle("alice", "complete 1", Some(1)).await.unwrap();
        assert_eq!(reply.response, "Completed task with ID: 1 (buy milk)");

        let reply = chat.handle("alice", "show all", Some(1)).await.unwrap();
        assert_eq!(reply.response, "Found 1 tasks:\n- [x] #1 buy milk");

        let reply = chat.handle("alice", "delete 1", Some(1)).await.unwrap();
        assert_eq!(reply.response, "Deleted task with ID: 1 (buy milk)");

        let reply = chat.handle("alice", "show all", Some(1)).await.unwrap();
        assert_eq!(reply.response, "You have no tasks.");

        let history = chat.conversations().get_messages("alice", 1).unwrap();
        assert_eq!(history.len(), 12);
        assert_eq!(history[0].role, MessageRole::User);
        assert_eq!(history[1].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn test_chat_cannot_touch_other_users_tasks() {
        let chat = keyword_service();
        chat.handle("alice", "add secret plan", None).await.unwrap();

        let reply = chat.handle("bob", "delete 1", None).await.unwrap();
        assert_eq!(
            reply.response,
            "Sorry, I couldn't do that: Error executing tool delete_task: \
             Task with ID 1 not found or does not belong to user"
        );

        let reply = chat.handle("alice", "show all", Some(1)).await.unwrap();
        assert!(reply.response.contains("secret plan"));
    }

    #[tokio::test]
    async fn test_planner_user_id_is_overridden() {
        let db = Database::in_memory().unwrap();
        let repo = TaskRepository::new(db.clone());
        let chat = ChatService::new(
            Arc::new(TodoMcpServer::new(db.clone())),
            Arc::new(FixedPlanner(Plan::Call {
                tool: "add_task".into(),
                arguments: json!({"user_id": "mallory", "title": "sneaky"}),
            })),
            ConversationStore::new(db),
        );

        chat.handle("alice", "anything", None).await.unwrap();

        assert_eq!(repo.list("alice", StatusFilter::All).unwrap().len(), 1);
        assert!(repo.list("mallory", StatusFilter::All).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_tool_from_planner() {
        let chat = service_with(Arc::new(FixedPlanner(Plan::Call {
            tool: "launch_rocket".into(),
            arguments: json!({}),
        })));

        let reply = chat.handle("alice", "do it", None).await.unwrap();
        assert_eq!(
            reply.response,
            "Sorry, I couldn't do that: Unknown tool: launch_rocket"
        );
    }

    #[tokio::test]
    async fn test_reply_without_tool() {
        let chat = keyword_service();
        let reply = chat.handle("alice", "hello there", None).await.unwrap();
        assert!(reply.response.starts_with("I can manage your todo list."));
    }

    #[tokio::test]
    async fn test_validation_and_conversation_errors() {
        let chat = keyword_service();

        let err = chat.handle("alice", "   ", None).await.unwrap_err();
        assert!(matches!(err, TodoError::Validation(_)));

        let err = chat.handle("", "add milk", None).await.unwrap_err();
        assert!(matches!(err, TodoError::Validation(_)));

        let err = chat.handle("alice", "add milk", Some(99)).await.unwrap_err();
        assert!(matches!(err, TodoError::ConversationNotFound { conversation_id: 99 }));

        let reply = chat.handle("alice", "add milk", None).await.unwrap();
        let err = chat
            .handle("bob", "show all", Some(reply.conversation_id))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_planner_failure_keeps_user_message() {
        let chat = service_with(Arc::new(FailingPlanner));

        let err = chat.handle("alice", "add milk", None).await.unwrap_err();
        assert!(matches!(err, TodoError::Upstream(_)));

        let history = chat.conversations().get_messages("alice", 1).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content, "add milk");
    }

    #[test]
    fn test_scope_to_user() {
        assert_eq!(
            scope_to_user(json!({"user_id": "x", "task_id": 1}), "alice"),
            json!({"user_id": "alice", "task_id": 1})
        );
        assert_eq!(scope_to_user(Value::Null, "alice"), json!({"user_id": "alice"}));
        assert_eq!(scope_to_user(json!([1, 2]), "alice"), json!([1, 2]));
    }
}
