//! Delete task action

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::actions::params::{coerce_task_id, parse_params};
use crate::protocol::{Action, ActionDefinition, ActionName};
use crate::store::EntityStore;
use crate::types::McpResult;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DeleteTaskParams {
    #[serde(deserialize_with = "coerce_task_id")]
    task_id: u64,
}

/// Action for deleting a task
pub struct DeleteTaskAction {
    store: Arc<EntityStore>,
}

impl DeleteTaskAction {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }
}

impl Action for DeleteTaskAction {
    fn definition(&self) -> ActionDefinition {
        ActionDefinition::new(
            ActionName::DeleteTask,
            "Delete a task by id",
            json!({
                "type": "object",
                "properties": {
                    "task_id": { "type": "integer" }
                },
                "required": ["task_id"]
            }),
        )
    }

    fn execute(&self, params: Value) -> McpResult<Value> {
        let params: DeleteTaskParams = parse_params(ActionName::DeleteTask, params)?;
        let removed = self.store.delete_task(params.task_id)?;
        Ok(json!({ "task_id": removed.id, "deleted": true }))
    }
}
