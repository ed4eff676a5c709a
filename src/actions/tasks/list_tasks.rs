//! List tasks action

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::actions::params::parse_params;
use crate::protocol::{Action, ActionDefinition, ActionName};
use crate::store::EntityStore;
use crate::types::{McpResult, TaskStatus};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ListTasksParams {
    #[serde(default)]
    status: Option<TaskStatus>,
    #[serde(default)]
    assigned_to: Option<String>,
}

/// Action listing tasks with optional exact-match filters
pub struct ListTasksAction {
    store: Arc<EntityStore>,
}

impl ListTasksAction {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }
}

impl Action for ListTasksAction {
    fn definition(&self) -> ActionDefinition {
        ActionDefinition::new(
            ActionName::ListTasks,
            "List tasks in creation order, optionally filtered by status and assignee",
            json!({
                "type": "object",
                "properties": {
                    "status": { "type": "string", "enum": ["pending", "in_progress", "completed"] },
                    "assigned_to": { "type": "string" }
                }
            }),
        )
    }

    fn execute(&self, params: Value) -> McpResult<Value> {
        let params: ListTasksParams = parse_params(ActionName::ListTasks, params)?;
        let tasks = self
            .store
            .list_tasks(params.status, params.assigned_to.as_deref());
        Ok(serde_json::to_value(tasks)?)
    }
}
