//! Task store over the shared database
//!
//! Every statement carries `user_id`, so a task is invisible to anyone but
//! its owner. Missing and foreign tasks produce the same `NotFound`.

use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row, Transaction};

use crate::db::{timestamp_column, Database};
use crate::error::{TodoError, TodoResult};
use crate::types::{
    Patch, ResultStatus, StatusFilter, Task, TaskPatch, TaskResult, TaskSummary,
};

const TASK_COLUMNS: &str = "id, user_id, title, description, completed, created_at, updated_at";

/// Task repository with shared database access
#[derive(Clone)]
pub struct TaskRepository {
    db: Database,
}

impl TaskRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Create a new task for `user_id`
    pub fn add(
        &self,
        user_id: &str,
        title: &str,
        description: Option<&str>,
    ) -> TodoResult<TaskResult> {
        require_user(user_id)?;
        require_title(title)?;

        let now = Utc::now().to_rfc3339();
        let mut conn = self.db.lock()?;
        let tx = conn.transaction()?;
        tx.execute(
            r#"
            INSERT INTO task (user_id, title, description, completed, created_at, updated_at)
            VALUES (?1, ?2, ?3, 0, ?4, ?4)
            "#,
            params![user_id, title, description, &now],
        )?;
        let task_id = tx.last_insert_rowid();
        tx.commit()?;

        tracing::debug!(user_id, task_id, "task added");

        Ok(TaskResult {
            task_id,
            status: ResultStatus::Active,
            title: title.to_string(),
        })
    }

    /// List a user's tasks in creation order
    pub fn list(&self, user_id: &str, filter: StatusFilter) -> TodoResult<Vec<TaskSummary>> {
        require_user(user_id)?;

        let conn = self.db.lock()?;
        let tasks = match filter.completed() {
            Some(completed) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM task WHERE user_id = ?1 AND completed = ?2 ORDER BY id",
                    TASK_COLUMNS
                ))?;
                let rows = stmt.query_map(params![user_id, completed], task_from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM task WHERE user_id = ?1 ORDER BY id",
                    TASK_COLUMNS
                ))?;
                let rows = stmt.query_map(params![user_id], task_from_row)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };

        Ok(tasks.iter().map(TaskSummary::from).collect())
    }

    /// Fetch one task with all its fields
    pub fn get(&self, user_id: &str, task_id: i64) -> TodoResult<Task> {
        let mut conn = self.db.lock()?;
        let tx = conn.transaction()?;
        let task = owned_task(&tx, user_id, task_id)?;
        tx.commit()?;
        Ok(task)
    }

    /// Mark a task as completed. Completing twice is not an error.
    pub fn complete(&self, user_id: &str, task_id: i64) -> TodoResult<TaskResult> {
        let now = Utc::now().to_rfc3339();
        let mut conn = self.db.lock()?;
        let tx = conn.transaction()?;
        let task = owned_task(&tx, user_id, task_id)?;
        tx.execute(
            "UPDATE task SET completed = 1, updated_at = ?1 WHERE id = ?2 AND user_id = ?3",
            params![&now, task_id, user_id],
        )?;
        tx.commit()?;

        tracing::debug!(user_id, task_id, "task completed");

        Ok(TaskResult {
            task_id,
            status: ResultStatus::Completed,
            title: task.title,
        })
    }

    /// Apply the fields set in `patch`; untouched fields keep their value
    pub fn update(&self, user_id: &str, task_id: i64, patch: TaskPatch) -> TodoResult<TaskResult> {
        if let Patch::Set(title) = patch.title.as_ref() {
            require_title(title)?;
        }

        let now = Utc::now().to_rfc3339();
        let mut conn = self.db.lock()?;
        let tx = conn.transaction()?;
        let mut task = owned_task(&tx, user_id, task_id)?;

        if let Patch::Set(title) = patch.title {
            task.title = title;
        }
        if let Patch::Set(description) = patch.description {
            task.description = description;
        }

        tx.execute(
            r#"
            UPDATE task SET title = ?1, description = ?2, updated_at = ?3
            WHERE id = ?4 AND user_id = ?5
            "#,
            params![&task.title, &task.description, &now, task_id, user_id],
        )?;
        tx.commit()?;

        tracing::debug!(user_id, task_id, "task updated");

        Ok(TaskResult {
            task_id,
            status: task.status().into(),
            title: task.title,
        })
    }

    /// Remove a task for good
    pub fn delete(&self, user_id: &str, task_id: i64) -> TodoResult<TaskResult> {
        let mut conn = self.db.lock()?;
        let tx = conn.transaction()?;
        let task = owned_task(&tx, user_id, task_id)?;
        tx.execute(
            "DELETE FROM task WHERE id = ?1 AND user_id = ?2",
            params![task_id, user_id],
        )?;
        tx.commit()?;

        tracing::debug!(user_id, task_id, "task deleted");

        Ok(TaskResult {
            task_id,
            status: ResultStatus::Deleted,
            title: task.title,
        })
    }
}

fn require_user(user_id: &str) -> TodoResult<()> {
    if user_id.trim().is_empty() {
        return Err(TodoError::validation("user_id must not be empty"));
    }
    Ok(())
}

fn require_title(title: &str) -> TodoResult<()> {
    if title.trim().is_empty() {
        return Err(TodoError::validation("Task title must not be empty"));
    }
    Ok(())
}

fn owned_task(tx: &Transaction<'_>, user_id: &str, task_id: i64) -> TodoResult<Task> {
    tx.query_row(
        &format!(
            "SELECT {} FROM task WHERE id = ?1 AND user_id = ?2",
            TASK_COLUMNS
        ),
        params![task_id, user_id],
        task_from_row,
    )
    .optional()?
    .ok_or(TodoError::NotFound { task_id })
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        completed: row.get(4)?,
        created_at: timestamp_column(row, 5)?,
        updated_at: timestamp_column(row, 6)?,
    })
}
