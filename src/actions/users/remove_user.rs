//! Remove user action

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::actions::params::parse_params;
use crate::protocol::{Action, ActionDefinition, ActionName};
use crate::store::EntityStore;
use crate::types::McpResult;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RemoveUserParams {
    username: String,
}

/// Action for deleting a user. Assigned tasks are left untouched.
pub struct RemoveUserAction {
    store: Arc<EntityStore>,
}

impl RemoveUserAction {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }
}

impl Action for RemoveUserAction {
    fn definition(&self) -> ActionDefinition {
        ActionDefinition::new(
            ActionName::RemoveUser,
            "Delete a user by username",
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
        let params: RemoveUserParams = parse_params(ActionName::RemoveUser, params)?;
        let removed = self.store.remove_user(&params.username)?;
        Ok(json!({ "username": removed.username, "removed": true }))
    }
}
