//! Conversation records

use super::ConversationStore;
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use todo_mcp::db::timestamp_column;
use todo_mcp::{TodoError, TodoResult};

/// Conversation record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: i64,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConversationStore {
    /// Start a new conversation for `user_id`
    pub fn create_conversation(&self, user_id: &str) -> TodoResult<Conversation> {
        let now = Utc::now();
        let conn = self.db.lock()?;
        conn.execute(
            "INSERT INTO conversation (user_id, created_at, updated_at) VALUES (?1, ?2, ?2)",
            params![user_id, now.to_rfc3339()],
        )?;
        let id = conn.last_insert_rowid();

        tracing::debug!(user_id, conversation_id = id, "conversation created");

        Ok(Conversation {
            id,
            user_id: user_id.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Fetch a conversation the user owns
    pub fn get_conversation(&self, user_id: &str, id: i64) -> TodoResult<Conversation> {
        let conn = self.db.lock()?;
        conn.query_row(
            r#"
            SELECT id, user_id, created_at, updated_at
            FROM conversation
            WHERE id = ?1 AND user_id = ?2
            "#,
            params![id, user_id],
            conversation_from_row,
        )
        .optional()?
        .ok_or(TodoError::ConversationNotFound { conversation_id: id })
    }

    /// The conversation the user touched last, if any
    pub fn latest_conversation(&self, user_id: &str) -> TodoResult<Option<Conversation>> {
        let conn = self.db.lock()?;
        let conversation = conn
            .query_row(
                r#"
                SELECT id, user_id, created_at, updated_at
                FROM conversation
                WHERE user_id = ?1
                ORDER BY updated_at DESC, id DESC
                LIMIT 1
                "#,
                params![user_id],
                conversation_from_row,
            )
            .optional()?;
        Ok(conversation)
    }

    /// Use the given conversation. Without an id, continue the user's latest
    /// conversation, or start one if they have none.
    pub fn resolve_conversation(&self, user_id: &str, id: Option<i64>) -> TodoResult<Conversation> {
        match id {
            Some(id) => self.get_conversation(user_id, id),
            None => match self.latest_conversation(user_id)? {
                Some(conversation) => Ok(conversation),
                None => self.create_conversation(user_id),
            },
        }
    }
}

fn conversation_from_row(row: &Row<'_>) -> rusqlite::Result<Conversation> {
    Ok(Conversation {
        id: row.get(0)?,
        user_id: row.get(1)?,
        created_at: timestamp_column(row, 2)?,
        updated_at: timestamp_column(row, 3)?,
    })
}
