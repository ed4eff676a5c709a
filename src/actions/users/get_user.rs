//! Get user action

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::actions::params::parse_params;
use crate::protocol::{Action, ActionDefinition, ActionName};
use crate::store::EntityStore;
use crate::types::McpResult;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct GetUserParams {
    username: String,
}

/// Action returning a user together with the tasks assigned to it
pub struct GetUserAction {
    store: Arc<EntityStore>,
}

impl GetUserAction {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }
}

impl Action for GetUserAction {
    fn definition(&self) -> ActionDefinition {
        ActionDefinition::new(
            ActionName::GetUser,
            "Get a user with its assigned tasks",
            json!({
                "type": "object",
                "properties": {
                    "username": { "type": "string" }
                },
                "required": ["username"]
            }),
        )
    }

    fn execute(&self, params: Value) -> McpResult<Value> {
        let params: GetUserParams = parse_params(ActionName::GetUser, params)?;
        let user = self.store.get_user(&params.username)?;
        let tasks = self.store.list_tasks(None, Some(&user.username));

        let mut value = serde_json::to_value(user)?;
        if let Value::Object(ref mut map) = value {
            map.insert("task_count".to_string(), json!(tasks.len()));
            map.insert("tasks".to_string(), serde_json::to_value(tasks)?);
        }
        Ok(value)
    }
}
