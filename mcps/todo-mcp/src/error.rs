//! Error taxonomy for task operations

use thiserror::Error;

/// Errors raised by the task store and the tool dispatcher
#[derive(Debug, Error)]
pub enum TodoError {
    /// A required argument is missing or malformed
    #[error("{0}")]
    Validation(String),

    /// The task does not exist or belongs to someone else.
    /// Both cases share one message so callers cannot probe other users' ids.
    #[error("Task with ID {task_id} not found or does not belong to user")]
    NotFound { task_id: i64 },

    /// A conversation id that is absent or owned by another user
    #[error("Conversation with ID {conversation_id} not found or does not belong to user")]
    ConversationNotFound { conversation_id: i64 },

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Storage engine or language-model failure
    #[error("{0}")]
    Upstream(String),
}

impl TodoError {
    pub fn validation(message: impl Into<String>) -> Self {
        TodoError::Validation(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        TodoError::Upstream(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TodoError::NotFound { .. } | TodoError::ConversationNotFound { .. }
        )
    }
}

impl From<rusqlite::Error> for TodoError {
    fn from(err: rusqlite::Error) -> Self {
        TodoError::Upstream(format!("Database error: {}", err))
    }
}

pub type TodoResult<T> = Result<T, TodoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_hides_owner() {
        let err = TodoError::NotFound { task_id: 42 };
        assert_eq!(
            err.to_string(),
            "Task with ID 42 not found or does not belong to user"
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn test_unknown_tool_message() {
        let err = TodoError::UnknownTool("fly".into());
        assert_eq!(err.to_string(), "Unknown tool: fly");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_sqlite_error_is_upstream() {
        let err: TodoError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, TodoError::Upstream(_)));
    }
}
