//! Shared application state

use std::sync::Arc;
use todo_mcp::{Database, TaskRepository, TodoMcpServer};

use crate::chat::ChatService;
use crate::db::ConversationStore;
use crate::llm::ToolPlanner;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Chat pipeline
    pub chat: Arc<ChatService>,
    /// Direct task access for the REST routes
    pub tasks: TaskRepository,
    pub conversations: ConversationStore,
}

impl AppState {
    /// Wire every component to the same database handle
    pub fn new(db: Database, planner: Arc<dyn ToolPlanner>) -> Self {
        let conversations = ConversationStore::new(db.clone());
        let chat = ChatService::new(
            Arc::new(TodoMcpServer::new(db.clone())),
            planner,
            conversations.clone(),
        );

        Self {
            chat: Arc::new(chat),
            tasks: TaskRepository::new(db),
            conversations,
        }
    }

    pub fn planner_name(&self) -> &str {
        self.chat.planner_name()
    }
}
