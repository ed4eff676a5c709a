//! Summarize data action

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::actions::params::parse_params;
use crate::protocol::{Action, ActionDefinition, ActionName};
use crate::store::EntityStore;
use crate::types::{McpResult, Summary};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SummarizeDataParams {}

/// Action reporting task counts by status, priority and assignee
pub struct SummarizeDataAction {
    store: Arc<EntityStore>,
}

impl SummarizeDataAction {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }
}

impl Action for SummarizeDataAction {
    fn definition(&self) -> ActionDefinition {
        ActionDefinition::new(
            ActionName::SummarizeData,
            "Summarize users and tasks: totals and task counts by status, priority and assignee",
            json!({ "type": "object", "properties": {} }),
        )
    }

    fn execute(&self, params: Value) -> McpResult<Value> {
        let _: SummarizeDataParams = parse_params(ActionName::SummarizeData, params)?;
        let tasks = self.store.list_tasks(None, None);
        let summary = Summary::from_tasks(self.store.user_count(), &tasks);
        Ok(json!({ "summary": summary }))
    }
}
