//! Conversation persistence
//!
//! Conversations and messages share the task database. The store is handed
//! the same [`Database`] the task tools use.

pub mod conversations;
pub mod messages;

pub use conversations::Conversation;
pub use messages::{Message, MessageRole};

use todo_mcp::Database;

/// Conversation and message store scoped by user
#[derive(Clone)]
pub struct ConversationStore {
    db: Database,
}

impl ConversationStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}
