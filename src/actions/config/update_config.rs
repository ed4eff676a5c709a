//! Update config action

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::actions::params::parse_params;
use crate::protocol::{Action, ActionDefinition, ActionName};
use crate::store::EntityStore;
use crate::types::McpResult;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct UpdateConfigParams {
    key: String,
    #[serde(default)]
    value: Value,
}

/// Action upserting a config entry
pub struct UpdateConfigAction {
    store: Arc<EntityStore>,
}

impl UpdateConfigAction {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }
}

impl Action for UpdateConfigAction {
    fn definition(&self) -> ActionDefinition {
        ActionDefinition::new(
            ActionName::UpdateConfig,
            "Create or overwrite a config value; any JSON value is accepted",
            json!({
                "type": "object",
                "properties": {
                    "key": { "type": "string" },
                    "value": {}
                },
                "required": ["key"]
            }),
        )
    }

    fn execute(&self, params: Value) -> McpResult<Value> {
        let params: UpdateConfigParams = parse_params(ActionName::UpdateConfig, params)?;
        let entry = self.store.update_config(&params.key, params.value)?;
        Ok(json!({ "key": entry.key, "value": entry.value, "updated": true }))
    }
}
