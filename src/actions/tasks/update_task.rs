//! Update task action

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::actions::params::{coerce_task_id, explicit_null, parse_params};
use crate::protocol::{Action, ActionDefinition, ActionName};
use crate::store::EntityStore;
use crate::types::{McpResult, TaskPatch, TaskPriority, TaskStatus};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct UpdateTaskParams {
    #[serde(deserialize_with = "coerce_task_id")]
    task_id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    priority: Option<TaskPriority>,
    #[serde(default)]
    status: Option<TaskStatus>,
    #[serde(default, deserialize_with = "explicit_null")]
    assigned_to: Option<Option<String>>,
}

/// Action applying a partial update to a task
pub struct UpdateTaskAction {
    store: Arc<EntityStore>,
}

impl UpdateTaskAction {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }
}

impl Action for UpdateTaskAction {
    fn definition(&self) -> ActionDefinition {
        ActionDefinition::new(
            ActionName::UpdateTask,
            "Update the supplied fields of a task",
            json!({
                "type": "object",
                "properties": {
                    "task_id": { "type": "integer" },
                    "title": { "type": "string" },
                    "description": { "type": "string" },
                    "priority": { "type": "string", "enum": ["low", "medium", "high"] },
                    "status": { "type": "string", "enum": ["pending", "in_progress", "completed"] },
                    "assigned_to": { "type": ["string", "null"], "description": "null clears the assignee" }
                },
                "required": ["task_id"]
            }),
        )
    }

    fn execute(&self, params: Value) -> McpResult<Value> {
        let params: UpdateTaskParams = parse_params(ActionName::UpdateTask, params)?;
        let patch = TaskPatch {
            title: params.title,
            description: params.description,
            priority: params.priority,
            status: params.status,
            assigned_to: params.assigned_to,
        };
        let task = self.store.update_task(params.task_id, patch)?;
        Ok(serde_json::to_value(task)?)
    }
}
