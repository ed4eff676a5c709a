//! Integration tests for the action router, store and audit log

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use serde_json::{json, Value};

use agent_memory::logs::LogManager;
use agent_memory::server::ActionRouter;
use agent_memory::store::EntityStore;
use agent_memory::types::{LogStatus, McpError};
use agent_memory::utils::SystemClock;

fn setup_router() -> ActionRouter {
    ActionRouter::with_default_actions(Arc::new(EntityStore::new()), Arc::new(LogManager::new()))
}

fn ids(data: &Value) -> Vec<u64> {
    data.as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_u64().unwrap())
        .collect()
}

#[test]
fn test_duplicate_user_leaves_one_record() {
    let router = setup_router();

    router.dispatch("add_user", json!({"username": "alice"})).unwrap();
    let err = router
        .dispatch("add_user", json!({"username": "alice"}))
        .unwrap_err();
    assert!(matches!(err, McpError::DuplicateResource(_)));

    let users = router.dispatch("list_users", json!({})).unwrap();
    assert_eq!(users.data.as_array().unwrap().len(), 1);

    let errors = router.logs().by_status(LogStatus::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].action, "add_user");
}

#[test]
fn test_first_task_gets_id_one_with_defaults() {
    let router = setup_router();

    let task = router
        .dispatch("add_task", json!({"title": "Ship v1"}))
        .unwrap()
        .data;

    assert_eq!(task["id"], 1);
    assert_eq!(task["title"], "Ship v1");
    assert_eq!(task["status"], "pending");
    assert_eq!(task["priority"], "medium");
    assert_eq!(task["assigned_to"], Value::Null);
}

#[test]
fn test_search_is_case_insensitive() {
    let router = setup_router();
    router
        .dispatch("add_task", json!({"title": "Fix auth bug"}))
        .unwrap();
    router
        .dispatch(
            "add_task",
            json!({"title": "Write docs", "description": "covers OAuth flow"}),
        )
        .unwrap();
    router
        .dispatch("add_task", json!({"title": "Refactor"}))
        .unwrap();

    let found = router
        .dispatch("search_tasks", json!({"query": "AUTH"}))
        .unwrap();
    assert_eq!(ids(&found.data), vec![1, 2]);
}

#[test]
fn test_missing_config_key_is_not_found() {
    let router = setup_router();

    let err = router
        .dispatch("get_config", json!({"key": "missing"}))
        .unwrap_err();
    assert!(matches!(err, McpError::NotFound(_)));

    let records = router.logs().list(None, None);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, LogStatus::Error);
}

#[test]
fn test_unknown_action_is_logged() {
    let router = setup_router();

    let err = router.dispatch("launch_rockets", json!({})).unwrap_err();
    assert!(matches!(err, McpError::UnknownAction(_)));
    assert_eq!(err.to_string(), "Unknown action: launch_rockets");

    let records = router.logs().by_action("launch_rockets");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, LogStatus::Error);
}

#[test]
fn test_invalid_enum_values_are_rejected() {
    let router = setup_router();

    let err = router
        .dispatch("add_task", json!({"title": "x", "priority": "urgent"}))
        .unwrap_err();
    assert!(matches!(err, McpError::InvalidInput(_)));

    let err = router
        .dispatch("list_tasks", json!({"status": "archived"}))
        .unwrap_err();
    assert!(matches!(err, McpError::InvalidInput(_)));
    assert_eq!(router.store().task_count(), 0);
}

#[test]
fn test_update_and_delete_flow() {
    let router = setup_router();
    router.dispatch("add_user", json!({"username": "bob"})).unwrap();
    router
        .dispatch("add_task", json!({"title": "Deploy", "assigned_to": "bob"}))
        .unwrap();

    let updated = router
        .dispatch(
            "update_task",
            json!({"task_id": "1", "status": "in_progress", "priority": "high"}),
        )
        .unwrap()
        .data;
    assert_eq!(updated["status"], "in_progress");
    assert_eq!(updated["priority"], "high");
    assert_eq!(updated["title"], "Deploy");

    let user = router
        .dispatch("get_user", json!({"username": "bob"}))
        .unwrap()
        .data;
    assert_eq!(user["task_count"], 1);

    let deleted = router
        .dispatch("delete_task", json!({"task_id": 1}))
        .unwrap()
        .data;
    assert_eq!(deleted, json!({"task_id": 1, "deleted": true}));

    let err = router
        .dispatch("update_task", json!({"task_id": 1, "title": "again"}))
        .unwrap_err();
    assert!(matches!(err, McpError::NotFound(_)));

    let next = router.dispatch("add_task", json!({"title": "Next"})).unwrap();
    assert_eq!(next.data["id"], 2);
}

#[test]
fn test_list_tasks_filters() {
    let router = setup_router();
    let seed = [
        json!({"title": "a", "assigned_to": "alice"}),
        json!({"title": "b", "assigned_to": "bob", "status": "completed"}),
        json!({"title": "c", "assigned_to": "alice", "status": "completed"}),
        json!({"title": "d"}),
    ];
    for task in seed {
        router.dispatch("add_task", task).unwrap();
    }

    let completed = router
        .dispatch("list_tasks", json!({"status": "completed"}))
        .unwrap();
    assert_eq!(ids(&completed.data), vec![2, 3]);

    let alice = router
        .dispatch("list_tasks", json!({"assigned_to": "alice"}))
        .unwrap();
    assert_eq!(ids(&alice.data), vec![1, 3]);

    let both = router
        .dispatch(
            "list_tasks",
            json!({"status": "completed", "assigned_to": "alice"}),
        )
        .unwrap();
    assert_eq!(ids(&both.data), vec![3]);
}

#[test]
fn test_summarize_data_counts() {
    let router = setup_router();
    router.dispatch("add_user", json!({"username": "alice"})).unwrap();
    router
        .dispatch("add_task", json!({"title": "a", "assigned_to": "alice"}))
        .unwrap();
    router
        .dispatch("add_task", json!({"title": "b", "priority": "high"}))
        .unwrap();

    let summary = router.dispatch("summarize_data", json!({})).unwrap().data;
    let summary = &summary["summary"];
    assert_eq!(summary["total_users"], 1);
    assert_eq!(summary["total_tasks"], 2);
    assert_eq!(summary["tasks_by_status"]["pending"], 2);
    assert_eq!(summary["tasks_by_priority"]["high"], 1);
    assert_eq!(summary["tasks_by_assignee"]["unassigned"], 1);

    // Utilities never mutate the store
    assert_eq!(router.store().task_count(), 2);
}

#[test]
fn test_log_retention_keeps_most_recent() {
    let logs = Arc::new(LogManager::with_retention(5, Arc::new(SystemClock::new())).unwrap());
    let router = ActionRouter::with_default_actions(Arc::new(EntityStore::new()), logs);

    for i in 0..12 {
        router
            .dispatch("calculate", json!({"operation": "sum", "numbers": [i]}))
            .unwrap();
    }

    let records = router.logs().list(None, None);
    assert_eq!(records.len(), 5);
    let params: Vec<&str> = records.iter().map(|r| r.payload.params.as_str()).collect();
    assert!(params[0].contains("[7]"));
    assert!(params[4].contains("[11]"));

    for pair in records.windows(2) {
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }
}

#[test]
fn test_payloads_are_truncated() {
    let router = setup_router();
    let long_title = "x".repeat(5000);

    router
        .dispatch("add_task", json!({"title": long_title}))
        .unwrap();

    let record = &router.logs().list(None, None)[0];
    assert_eq!(record.payload.params.chars().count(), 200);
    assert_eq!(record.payload.result.chars().count(), 200);
}

#[test]
fn test_concurrent_task_ids_are_unique_and_contiguous() {
    let router = Arc::new(setup_router());
    let mut handles = vec![];

    for t in 0..8 {
        let router = Arc::clone(&router);
        handles.push(thread::spawn(move || {
            (0..25)
                .map(|i| {
                    router
                        .dispatch("add_task", json!({"title": format!("t{}-{}", t, i)}))
                        .unwrap()
                        .data["id"]
                        .as_u64()
                        .unwrap()
                })
                .collect::<Vec<u64>>()
        }));
    }

    let mut seen = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(seen.insert(id), "duplicate id {}", id);
        }
    }

    assert_eq!(seen.len(), 200);
    assert_eq!(seen.iter().min(), Some(&1));
    assert_eq!(seen.iter().max(), Some(&200));
    assert_eq!(router.logs().count(), 200);
}

#[test]
fn test_concurrent_duplicate_user_admits_exactly_one() {
    let router = Arc::new(setup_router());
    let mut handles = vec![];

    for _ in 0..16 {
        let router = Arc::clone(&router);
        handles.push(thread::spawn(move || {
            router
                .dispatch("add_user", json!({"username": "racer"}))
                .is_ok()
        }));
    }

    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(successes, 1);
    assert_eq!(router.store().user_count(), 1);
    assert_eq!(router.logs().by_status(LogStatus::Error).len(), 15);
}

#[test]
fn test_concurrent_reads_see_whole_tasks() {
    let router = Arc::new(setup_router());
    let mut handles = vec![];

    for w in 0..4 {
        let router = Arc::clone(&router);
        handles.push(thread::spawn(move || {
            for i in 0..50 {
                router
                    .dispatch(
                        "add_task",
                        json!({"title": format!("w{}-{}", w, i), "description": "body"}),
                    )
                    .unwrap();
            }
        }));
    }

    for _ in 0..4 {
        let router = Arc::clone(&router);
        handles.push(thread::spawn(move || {
            for _ in 0..50 {
                let tasks = router.dispatch("list_tasks", json!({})).unwrap().data;
                for task in tasks.as_array().unwrap() {
                    assert_eq!(task["description"], "body");
                    assert!(task["title"].as_str().unwrap().starts_with('w'));
                }
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(router.store().task_count(), 200);
}

#[test]
fn test_reset_never_drops_logs_of_surviving_tasks() {
    let router = Arc::new(setup_router());

    for round in 0..300 {
        let writer = {
            let router = Arc::clone(&router);
            thread::spawn(move || {
                for i in 0..4 {
                    router
                        .dispatch("add_task", json!({"title": format!("r{}-{}", round, i)}))
                        .unwrap();
                }
            })
        };
        router.reset().unwrap();
        writer.join().unwrap();

        let tasks = router.store().task_count();
        let logged = router.logs().by_action("add_task").len();
        assert!(
            tasks <= logged,
            "round {}: {} tasks but {} add_task records",
            round,
            tasks,
            logged
        );
    }
}
