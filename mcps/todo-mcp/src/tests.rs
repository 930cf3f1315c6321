//! Tests for the task repository and tool dispatch

#[cfg(test)]
#[allow(clippy::module_inception)]
mod tests {
    use serde_json::json;

    use crate::db::Database;
    use crate::error::TodoError;
    use crate::handlers::dispatch;
    use crate::repository::TaskRepository;
    use crate::types::{Patch, ResultStatus, StatusFilter, TaskPatch, TaskStatus};

    /// Create an in-memory test repository
    fn create_test_repo() -> TaskRepository {
        TaskRepository::new(Database::in_memory().unwrap())
    }

    #[test]
    fn test_end_to_end_scenario() {
        let repo = create_test_repo();

        let added = repo.add("u1", "Buy milk", None).unwrap();
        assert_eq!(added.task_id, 1);
        assert_eq!(added.status, ResultStatus::Active);
        assert_eq!(added.title, "Buy milk");

        let tasks = repo.list("u1", StatusFilter::All).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].task_id, 1);
        assert_eq!(tasks[0].status, TaskStatus::Active);

        let completed = repo.complete("u1", 1).unwrap();
        assert_eq!(completed.status, ResultStatus::Completed);

        assert!(repo.list("u1", StatusFilter::Active).unwrap().is_empty());
        assert_eq!(repo.list("u1", StatusFilter::Completed).unwrap().len(), 1);

        let deleted = repo.delete("u1", 1).unwrap();
        assert_eq!(deleted.status, ResultStatus::Deleted);
        assert_eq!(deleted.title, "Buy milk");

        assert!(repo.list("u1", StatusFilter::All).unwrap().is_empty());
    }

    #[test]
    fn test_add_rejects_empty_title() {
        let repo = create_test_repo();

        for title in ["", "   "] {
            let err = repo.add("u1", title, None).unwrap_err();
            assert!(matches!(err, TodoError::Validation(_)));
        }
        assert!(matches!(
            repo.add("", "Buy milk", None).unwrap_err(),
            TodoError::Validation(_)
        ));
        assert!(repo.list("u1", StatusFilter::All).unwrap().is_empty());
    }

    #[test]
    fn test_ownership_isolation() {
        let repo = create_test_repo();
        let task = repo.add("alice", "Secret plan", Some("details")).unwrap();

        let patch = TaskPatch {
            title: Patch::Set("Hijacked".into()),
            ..Default::default()
        };

        let errors = [
            repo.complete("bob", task.task_id).unwrap_err(),
            repo.update("bob", task.task_id, patch).unwrap_err(),
            repo.delete("bob", task.task_id).unwrap_err(),
            repo.get("bob", task.task_id).unwrap_err(),
        ];
        for err in errors {
            assert!(matches!(err, TodoError::NotFound { task_id } if task_id == task.task_id));
            assert!(!err.to_string().contains("Secret plan"));
        }

        assert!(repo.list("bob", StatusFilter::All).unwrap().is_empty());

        // alice's task is untouched
        let stored = repo.get("alice", task.task_id).unwrap();
        assert_eq!(stored.title, "Secret plan");
        assert!(!stored.completed);
    }

    #[test]
    fn test_missing_and_foreign_tasks_look_the_same() {
        let repo = create_test_repo();
        let task = repo.add("alice", "Mine", None).unwrap();

        let foreign = repo.complete("bob", task.task_id).unwrap_err().to_string();
        let missing = repo.complete("bob", 999).unwrap_err().to_string();
        assert_eq!(foreign.replace(&task.task_id.to_string(), "N"), missing.replace("999", "N"));
    }

    #[test]
    fn test_status_derived_from_completed() {
        let repo = create_test_repo();
        repo.add("u1", "One", None).unwrap();
        repo.add("u1", "Two", None).unwrap();
        repo.complete("u1", 2).unwrap();

        for summary in repo.list("u1", StatusFilter::All).unwrap() {
            let task = repo.get("u1", summary.task_id).unwrap();
            assert_eq!(summary.status == TaskStatus::Completed, task.completed);
            assert_eq!(task.status(), summary.status);
        }
    }

    #[test]
    fn test_complete_is_repeatable() {
        let repo = create_test_repo();
        repo.add("u1", "Walk dog", None).unwrap();

        let before = repo.get("u1", 1).unwrap();
        repo.complete("u1", 1).unwrap();
        let again = repo.complete("u1", 1).unwrap();
        assert_eq!(again.status, ResultStatus::Completed);

        let after = repo.get("u1", 1).unwrap();
        assert!(after.completed);
        assert!(after.updated_at >= before.updated_at);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn test_update_only_touches_set_fields() {
        let repo = create_test_repo();
        repo.add("u1", "Draft", Some("first pass")).unwrap();

        // keep description, change title
        let result = repo
            .update(
                "u1",
                1,
                TaskPatch {
                    title: Patch::Set("Final".into()),
                    description: Patch::Keep,
                },
            )
            .unwrap();
        assert_eq!(result.title, "Final");
        assert_eq!(result.status, ResultStatus::Active);
        let task = repo.get("u1", 1).unwrap();
        assert_eq!(task.description.as_deref(), Some("first pass"));

        // clear description, keep title
        repo.update(
            "u1",
            1,
            TaskPatch {
                title: Patch::Keep,
                description: Patch::Set(None),
            },
        )
        .unwrap();
        let task = repo.get("u1", 1).unwrap();
        assert_eq!(task.title, "Final");
        assert_eq!(task.description, None);

        // blank title is rejected
        let err = repo
            .update(
                "u1",
                1,
                TaskPatch {
                    title: Patch::Set(" ".into()),
                    description: Patch::Keep,
                },
            )
            .unwrap_err();
        assert!(matches!(err, TodoError::Validation(_)));
    }

    #[test]
    fn test_update_reports_completed_status() {
        let repo = create_test_repo();
        repo.add("u1", "Done thing", None).unwrap();
        repo.complete("u1", 1).unwrap();

        let result = repo.update("u1", 1, TaskPatch::default()).unwrap();
        assert_eq!(result.status, ResultStatus::Completed);
    }

    #[test]
    fn test_delete_twice() {
        let repo = create_test_repo();
        repo.add("u1", "Temporary", None).unwrap();

        repo.delete("u1", 1).unwrap();
        for _ in 0..2 {
            let err = repo.delete("u1", 1).unwrap_err();
            assert!(matches!(err, TodoError::NotFound { task_id: 1 }));
        }
    }

    #[test]
    fn test_ids_are_unique_across_users() {
        let repo = create_test_repo();
        let a = repo.add("alice", "A", None).unwrap();
        let b = repo.add("bob", "B", None).unwrap();
        assert_ne!(a.task_id, b.task_id);

        // ids are not reused after delete
        repo.delete("bob", b.task_id).unwrap();
        let c = repo.add("bob", "C", None).unwrap();
        assert!(c.task_id > b.task_id);
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    #[test]
    fn test_dispatch_success_messages() {
        let repo = create_test_repo();

        let r = dispatch(&repo, "add_task", json!({"user_id": "u1", "title": "Buy milk"}));
        assert!(!r.is_error);
        assert_eq!(r.content, "Added task with ID: 1");
        assert_eq!(
            r.structured_result,
            Some(json!({"task_id": 1, "status": "active", "title": "Buy milk"}))
        );

        let r = dispatch(&repo, "list_tasks", json!({"user_id": "u1"}));
        assert_eq!(r.content, "Found 1 tasks");
        assert_eq!(
            r.structured_result,
            Some(json!({"tasks": [{"task_id": 1, "status": "active", "title": "Buy milk"}]}))
        );

        let r = dispatch(&repo, "update_task", json!({"user_id": "u1", "task_id": 1, "title": "Buy oat milk"}));
        assert_eq!(r.content, "Updated task with ID: 1");

        let r = dispatch(&repo, "complete_task", json!({"user_id": "u1", "task_id": 1}));
        assert_eq!(r.content, "Completed task with ID: 1");

        let r = dispatch(&repo, "list_tasks", json!({"user_id": "u1", "status": "active"}));
        assert_eq!(r.content, "Found 0 tasks");

        let r = dispatch(&repo, "delete_task", json!({"user_id": "u1", "task_id": 1}));
        assert_eq!(r.content, "Deleted task with ID: 1");
        assert_eq!(r.structured_result.unwrap()["status"], "deleted");
    }

    #[test]
    fn test_dispatch_is_total() {
        let repo = create_test_repo();
        repo.add("owner", "Private", None).unwrap();

        let cases = [
            ("unknown_tool", json!({"user_id": "u1"})),
            ("", json!(null)),
            ("add_task", json!(null)),
            ("add_task", json!({"user_id": "u1"})),
            ("add_task", json!({"user_id": "u1", "title": ""})),
            ("add_task", json!({"user_id": 5, "title": "x"})),
            ("list_tasks", json!({})),
            ("list_tasks", json!("u1")),
            ("complete_task", json!({"user_id": "u1"})),
            ("complete_task", json!({"user_id": "u1", "task_id": 1})),
            ("complete_task", json!({"user_id": "u1", "task_id": 1.5})),
            ("delete_task", json!({"user_id": "u1", "task_id": -1})),
            ("delete_task", json!({"task_id": 1})),
            ("update_task", json!({"user_id": "u1", "task_id": "1"})),
            ("update_task", json!({"user_id": "u1", "task_id": 1, "title": "x"})),
        ];

        for (name, args) in cases {
            let response = dispatch(&repo, name, args.clone());
            assert!(response.is_error, "{} {} should fail", name, args);
            assert!(response.structured_result.is_none());
            assert!(!response.content.is_empty());
        }

        // the owner's task survived every attempt
        assert_eq!(repo.get("owner", 1).unwrap().title, "Private");
    }

    #[test]
    fn test_dispatch_error_messages() {
        let repo = create_test_repo();

        let r = dispatch(&repo, "fly", json!({}));
        assert_eq!(r.content, "Unknown tool: fly");

        let r = dispatch(&repo, "complete_task", json!({"user_id": "u1", "task_id": 9}));
        assert_eq!(
            r.content,
            "Error executing tool complete_task: Task with ID 9 not found or does not belong to user"
        );

        let r = dispatch(&repo, "delete_task", json!({"user_id": "u1"}));
        assert_eq!(
            r.content,
            "Error executing tool delete_task: Missing required argument: task_id"
        );
    }

    #[test]
    fn test_unknown_status_filter_lists_all() {
        let repo = create_test_repo();
        repo.add("u1", "A", None).unwrap();
        repo.add("u1", "B", None).unwrap();
        repo.complete("u1", 1).unwrap();

        let r = dispatch(&repo, "list_tasks", json!({"user_id": "u1", "status": "someday"}));
        assert!(!r.is_error);
        assert_eq!(r.content, "Found 2 tasks");
    }

    #[test]
    fn test_concurrent_access() {
        use std::thread;

        let repo = create_test_repo();
        let handles: Vec<_> = (0..2)
            .map(|t| {
                let repo = repo.clone();
                thread::spawn(move || {
                    for i in 0..10 {
                        repo.add(&format!("user{}", t), &format!("Task {}", i), None)
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(repo.list("user0", StatusFilter::All).unwrap().len(), 10);
        assert_eq!(repo.list("user1", StatusFilter::All).unwrap().len(), 10);
    }
}
