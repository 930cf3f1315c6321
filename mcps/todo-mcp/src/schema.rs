//! Database schema initialization
//!
//! The task tables and the chat tables live in one database so a
//! conversation message and the task it touched commit to the same file.

use rusqlite::Connection;

/// Create every table the workspace needs. Safe to run on each open.
pub fn ensure_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS task (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT,
            completed INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS conversation (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS message (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            conversation_id INTEGER NOT NULL,
            role TEXT NOT NULL CHECK (role IN ('user', 'assistant')),
            content TEXT NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY (conversation_id) REFERENCES conversation(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_task_user ON task(user_id, id);
        CREATE INDEX IF NOT EXISTS idx_conversation_user ON conversation(user_id);
        CREATE INDEX IF NOT EXISTS idx_message_conversation ON message(conversation_id, id);
        "#,
    )
}
