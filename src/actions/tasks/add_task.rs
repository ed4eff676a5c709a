//! Add task action

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::actions::params::parse_params;
use crate::protocol::{Action, ActionDefinition, ActionName};
use crate::store::EntityStore;
use crate::types::{McpResult, NewTask, TaskPriority, TaskStatus};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AddTaskParams {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    priority: Option<TaskPriority>,
    #[serde(default)]
    status: Option<TaskStatus>,
    #[serde(default)]
    assigned_to: Option<String>,
}

/// Action for creating a task
pub struct AddTaskAction {
    store: Arc<EntityStore>,
}

impl AddTaskAction {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }
}

impl Action for AddTaskAction {
    fn definition(&self) -> ActionDefinition {
        ActionDefinition::new(
            ActionName::AddTask,
            "Create a task; the server assigns its id",
            json!({
                "type": "object",
                "properties": {
                    "title": { "type": "string" },
                    "description": { "type": "string" },
                    "priority": { "type": "string", "enum": ["low", "medium", "high"] },
                    "status": { "type": "string", "enum": ["pending", "in_progress", "completed"] },
                    "assigned_to": { "type": "string", "description": "Username; not required to exist" }
                },
                "required": ["title"]
            }),
        )
    }

    fn execute(&self, params: Value) -> McpResult<Value> {
        let params: AddTaskParams = parse_params(ActionName::AddTask, params)?;
        let task = self.store.add_task(NewTask {
            title: params.title,
            description: params.description,
            priority: params.priority,
            status: params.status,
            assigned_to: params.assigned_to,
        })?;
        Ok(serde_json::to_value(task)?)
    }
}
