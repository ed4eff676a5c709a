//! Get config action

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::actions::params::parse_params;
use crate::protocol::{Action, ActionDefinition, ActionName};
use crate::store::EntityStore;
use crate::types::McpResult;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct GetConfigParams {
    #[serde(default)]
    key: Option<String>,
}

/// Action reading one config entry, or all of them
pub struct GetConfigAction {
    store: Arc<EntityStore>,
}

impl GetConfigAction {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }
}

impl Action for GetConfigAction {
    fn definition(&self) -> ActionDefinition {
        ActionDefinition::new(
            ActionName::GetConfig,
            "Read a config value by key, or the whole config when no key is given",
            json!({
                "type": "object",
                "properties": {
                    "key": { "type": "string" }
                }
            }),
        )
    }

    fn execute(&self, params: Value) -> McpResult<Value> {
        let params: GetConfigParams = parse_params(ActionName::GetConfig, params)?;
        let config = self.store.get_config(params.key.as_deref())?;
        Ok(serde_json::to_value(config)?)
    }
}
