//! Task operations
//!
//! Tasks are kept sorted by id. Ids are allocated while the tasks write lock is
//! held, so creation order and id order coincide and lookups can binary search.

use std::sync::atomic::Ordering;

use tracing::debug;

use crate::types::{McpError, McpResult, NewTask, Task, TaskPatch, TaskStatus};

use super::EntityStore;

fn task_not_found(id: u64) -> McpError {
    McpError::not_found(format!("Task {} not found", id))
}

fn require_title(title: &str) -> McpResult<()> {
    if title.trim().is_empty() {
        return Err(McpError::invalid_input("title is required"));
    }
    Ok(())
}

/// Create a task with the next id
pub fn add_task(store: &EntityStore, new_task: NewTask) -> McpResult<Task> {
    require_title(&new_task.title)?;

    let mut tasks = store.tasks.write();
    let id = store.next_task_id.fetch_add(1, Ordering::SeqCst);
    let now = store.clock.now();

    let task = Task {
        id,
        title: new_task.title,
        description: new_task.description.unwrap_or_default(),
        priority: new_task.priority.unwrap_or_default(),
        status: new_task.status.unwrap_or_default(),
        assigned_to: new_task.assigned_to,
        created_at: now,
        updated_at: now,
    };
    tasks.push(task.clone());

    if let Err(e) = store.persistence.save_tasks(&tasks, id + 1) {
        // The failed id was never visible to anyone, hand it out again
        tasks.pop();
        store.next_task_id.store(id, Ordering::SeqCst);
        return Err(e);
    }

    debug!(id, "Task added");
    Ok(task)
}

/// Apply the supplied fields only and bump `updated_at`
pub fn update_task(store: &EntityStore, id: u64, patch: TaskPatch) -> McpResult<Task> {
    if let Some(title) = &patch.title {
        require_title(title)?;
    }

    let mut tasks = store.tasks.write();
    let index = tasks
        .binary_search_by_key(&id, |t| t.id)
        .map_err(|_| task_not_found(id))?;

    let previous = tasks[index].clone();
    let task = &mut tasks[index];
    if let Some(title) = patch.title {
        task.title = title;
    }
    if let Some(description) = patch.description {
        task.description = description;
    }
    if let Some(priority) = patch.priority {
        task.priority = priority;
    }
    if let Some(status) = patch.status {
        task.status = status;
    }
    if let Some(assigned_to) = patch.assigned_to {
        task.assigned_to = assigned_to;
    }
    task.updated_at = store.clock.now();
    let updated = task.clone();

    let next_id = store.next_task_id.load(Ordering::SeqCst);
    if let Err(e) = store.persistence.save_tasks(&tasks, next_id) {
        tasks[index] = previous;
        return Err(e);
    }

    debug!(id, "Task updated");
    Ok(updated)
}

pub fn delete_task(store: &EntityStore, id: u64) -> McpResult<Task> {
    let mut tasks = store.tasks.write();
    let index = tasks
        .binary_search_by_key(&id, |t| t.id)
        .map_err(|_| task_not_found(id))?;

    let removed = tasks.remove(index);
    let next_id = store.next_task_id.load(Ordering::SeqCst);
    if let Err(e) = store.persistence.save_tasks(&tasks, next_id) {
        tasks.insert(index, removed);
        return Err(e);
    }

    debug!(id, "Task deleted");
    Ok(removed)
}

pub fn get_task(store: &EntityStore, id: u64) -> McpResult<Task> {
    let tasks = store.tasks.read();
    tasks
        .binary_search_by_key(&id, |t| t.id)
        .map(|index| tasks[index].clone())
        .map_err(|_| task_not_found(id))
}

/// Exact-match filters; `None` filters are ignored
pub fn list_tasks(
    store: &EntityStore,
    status: Option<TaskStatus>,
    assigned_to: Option<&str>,
) -> Vec<Task> {
    store
        .tasks
        .read()
        .iter()
        .filter(|t| status.map_or(true, |s| t.status == s))
        .filter(|t| assigned_to.map_or(true, |a| t.assigned_to.as_deref() == Some(a)))
        .cloned()
        .collect()
}

/// Case-insensitive substring search over title and description
pub fn search_tasks(store: &EntityStore, query: &str) -> McpResult<Vec<Task>> {
    if query.trim().is_empty() {
        return Err(McpError::invalid_input("query is required"));
    }
    let needle = query.to_lowercase();

    Ok(store
        .tasks
        .read()
        .iter()
        .filter(|t| t.matches(&needle))
        .cloned()
        .collect())
}
