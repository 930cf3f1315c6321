//! Message records

use super::ConversationStore;
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use todo_mcp::db::timestamp_column;
use todo_mcp::{TodoError, TodoResult};

/// Message role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageRole {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            _ => Err(TodoError::validation(format!("Unknown message role: {}", s))),
        }
    }
}

/// Message record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub user_id: String,
    pub conversation_id: i64,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ConversationStore {
    /// Append a message and bump the conversation's `updated_at`
    pub fn append_message(
        &self,
        user_id: &str,
        conversation_id: i64,
        role: MessageRole,
        content: &str,
    ) -> TodoResult<Message> {
        let now = Utc::now();
        let mut conn = self.db.lock()?;
        let tx = conn.transaction()?;

        let touched = tx.execute(
            "UPDATE conversation SET updated_at = ?1 WHERE id = ?2 AND user_id = ?3",
            params![now.to_rfc3339(), conversation_id, user_id],
        )?;
        if touched == 0 {
            return Err(TodoError::ConversationNotFound { conversation_id });
        }

        tx.execute(
            r#"
            INSERT INTO message (user_id, conversation_id, role, content, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![user_id, conversation_id, role.as_str(), content, now.to_rfc3339()],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Message {
            id,
            user_id: user_id.to_string(),
            conversation_id,
            role,
            content: content.to_string(),
            created_at: now,
        })
    }

    /// Messages of a conversation the user owns, oldest first
    pub fn get_messages(&self, user_id: &str, conversation_id: i64) -> TodoResult<Vec<Message>> {
        let conn = self.db.lock()?;

        let owned: Option<i64> = conn
            .query_row(
                "SELECT id FROM conversation WHERE id = ?1 AND user_id = ?2",
                params![conversation_id, user_id],
                |row| row.get(0),
            )
            .optional()?;
        if owned.is_none() {
            return Err(TodoError::ConversationNotFound { conversation_id });
        }

        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, conversation_id, role, content, created_at
            FROM message
            WHERE conversation_id = ?1
            ORDER BY id
            "#,
        )?;

        let rows = stmt
            .query_map(params![conversation_id], |row| {
                let role: String = row.get(3)?;
                let role = MessageRole::from_str(&role).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        3,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?;

                Ok(Message {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    conversation_id: row.get(2)?,
                    role,
                    content: row.get(4)?,
                    created_at: timestamp_column(row, 5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}
