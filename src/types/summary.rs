//! Aggregate statistics over the live task set

use std::collections::BTreeMap;

use serde::Serialize;

use super::{Task, TaskPriority, TaskStatus};

/// Bucket name for tasks without an assignee
pub const UNASSIGNED: &str = "unassigned";

/// Result of `summarize_data`
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_users: usize,
    pub total_tasks: usize,
    pub tasks_by_status: BTreeMap<String, usize>,
    pub tasks_by_priority: BTreeMap<String, usize>,
    pub tasks_by_assignee: BTreeMap<String, usize>,
}

impl Summary {
    /// Count tasks per status, priority and assignee.
    /// Every status and priority appears, even with a zero count.
    pub fn from_tasks(total_users: usize, tasks: &[Task]) -> Self {
        let mut tasks_by_status: BTreeMap<String, usize> = TaskStatus::ALL
            .iter()
            .map(|s| (s.as_str().to_string(), 0))
            .collect();
        let mut tasks_by_priority: BTreeMap<String, usize> = TaskPriority::ALL
            .iter()
            .map(|p| (p.as_str().to_string(), 0))
            .collect();
        let mut tasks_by_assignee = BTreeMap::new();

        for task in tasks {
            *tasks_by_status
                .entry(task.status.as_str().to_string())
                .or_default() += 1;
            *tasks_by_priority
                .entry(task.priority.as_str().to_string())
                .or_default() += 1;
            let assignee = task.assigned_to.as_deref().unwrap_or(UNASSIGNED);
            *tasks_by_assignee.entry(assignee.to_string()).or_default() += 1;
        }

        Self {
            total_users,
            total_tasks: tasks.len(),
            tasks_by_status,
            tasks_by_priority,
            tasks_by_assignee,
        }
    }
}
