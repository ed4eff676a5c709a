//! Search tasks action

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::actions::params::parse_params;
use crate::protocol::{Action, ActionDefinition, ActionName};
use crate::store::EntityStore;
use crate::types::McpResult;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SearchTasksParams {
    query: String,
}

/// Action for case-insensitive search over task titles and descriptions
pub struct SearchTasksAction {
    store: Arc<EntityStore>,
}

impl SearchTasksAction {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }
}

impl Action for SearchTasksAction {
    fn definition(&self) -> ActionDefinition {
        ActionDefinition::new(
            ActionName::SearchTasks,
            "Find tasks whose title or description contains the query (case-insensitive)",
            json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "minLength": 1 }
                },
                "required": ["query"]
            }),
        )
    }

    fn execute(&self, params: Value) -> McpResult<Value> {
        let params: SearchTasksParams = parse_params(ActionName::SearchTasks, params)?;
        let tasks = self.store.search_tasks(&params.query)?;
        Ok(serde_json::to_value(tasks)?)
    }
}
