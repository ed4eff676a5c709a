//! List users action

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::actions::params::parse_params;
use crate::protocol::{Action, ActionDefinition, ActionName};
use crate::store::EntityStore;
use crate::types::{McpResult, User};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ListUsersParams {}

/// Action returning every user in creation order
pub struct ListUsersAction {
    store: Arc<EntityStore>,
}

impl ListUsersAction {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }
}

impl Action for ListUsersAction {
    fn definition(&self) -> ActionDefinition {
        ActionDefinition::new(
            ActionName::ListUsers,
            "List all users in creation order",
            json!({ "type": "object", "properties": {} }),
        )
    }

    fn execute(&self, params: Value) -> McpResult<Value> {
        let _: ListUsersParams = parse_params(ActionName::ListUsers, params)?;
        let users: Vec<User> = self.store.list_users().collect();
        Ok(serde_json::to_value(users)?)
    }
}
