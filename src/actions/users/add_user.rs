//! Add user action

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::actions::params::parse_params;
use crate::protocol::{Action, ActionDefinition, ActionName};
use crate::store::EntityStore;
use crate::types::{McpResult, Metadata};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AddUserParams {
    username: String,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    metadata: Option<Metadata>,
}

/// Action for creating a user
pub struct AddUserAction {
    store: Arc<EntityStore>,
}

impl AddUserAction {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }
}

impl Action for AddUserAction {
    fn definition(&self) -> ActionDefinition {
        ActionDefinition::new(
            ActionName::AddUser,
            "Create a user; usernames are unique",
            json!({
                "type": "object",
                "properties": {
                    "username": { "type": "string", "description": "Unique, non-empty user name" },
                    "role": { "type": "string", "description": "Role, defaults to 'member'" },
                    "metadata": { "type": "object", "description": "Arbitrary key/value data" }
                },
                "required": ["username"]
            }),
        )
    }

    fn execute(&self, params: Value) -> McpResult<Value> {
        let params: AddUserParams = parse_params(ActionName::AddUser, params)?;
        let user = self
            .store
            .add_user(&params.username, params.role, params.metadata)?;
        Ok(serde_json::to_value(user)?)
    }
}
