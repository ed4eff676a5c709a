//! Action router
//!
//! Maps action names to handlers, runs them against the shared store and
//! records exactly one audit entry per dispatch, whatever the outcome.

mod handlers;

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::actions::register_all_actions;
use crate::logs::LogManager;
use crate::protocol::{Action, ActionDefinition, ActionName, Envelope};
use crate::store::EntityStore;
use crate::types::{LogStatus, McpError, McpResult};

pub use handlers::*;

/// Action name recorded for a reset
pub const RESET_ACTION: &str = "reset";

/// Routes named actions to their handlers
pub struct ActionRouter {
    actions: BTreeMap<ActionName, Box<dyn Action>>,
    store: Arc<EntityStore>,
    logs: Arc<LogManager>,
    /// Held shared by every dispatch and exclusively by reset, so a dispatch
    /// lands entirely before or entirely after a reset
    gate: RwLock<()>,
}

impl ActionRouter {
    /// Create a router with no actions registered
    pub fn new(store: Arc<EntityStore>, logs: Arc<LogManager>) -> Self {
        Self {
            actions: BTreeMap::new(),
            store,
            logs,
            gate: RwLock::new(()),
        }
    }

    /// Create a router with the full action catalogue
    pub fn with_default_actions(store: Arc<EntityStore>, logs: Arc<LogManager>) -> Self {
        let mut router = Self::new(store.clone(), logs);
        register_all_actions(&mut router, store);
        router
    }

    /// Register an action with the router
    pub fn register_action(&mut self, action: Box<dyn Action>) -> &mut Self {
        self.actions.insert(action.name(), action);
        self
    }

    /// Get the number of registered actions
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// Definitions of every registered action, ordered by name
    pub fn definitions(&self) -> Vec<ActionDefinition> {
        self.actions.values().map(|a| a.definition()).collect()
    }

    pub fn store(&self) -> &Arc<EntityStore> {
        &self.store
    }

    pub fn logs(&self) -> &Arc<LogManager> {
        &self.logs
    }

    /// Validate and run `action`, wrap the result in an envelope and record
    /// the outcome in the audit trail
    pub fn dispatch(&self, action: &str, params: Value) -> McpResult<Envelope> {
        let _gate = self.gate.read();
        let params_summary = summarize_value(&params);

        match self.execute(action, params) {
            Ok(data) => {
                self.logs.record(
                    action,
                    &params_summary,
                    &summarize_value(&data),
                    LogStatus::Success,
                );
                info!(action, "Action completed");
                Ok(Envelope::success(
                    data,
                    format!("Action '{}' completed successfully", action),
                ))
            }
            Err(e) => {
                self.logs
                    .record(action, &params_summary, &e.to_string(), LogStatus::Error);
                if e.is_domain() {
                    warn!(action, error = %e, "Action rejected");
                } else {
                    error!(action, error = %e, "Action failed");
                }
                Err(e)
            }
        }
    }

    fn execute(&self, action: &str, params: Value) -> McpResult<Value> {
        let name: ActionName = action.parse()?;
        let handler = self
            .actions
            .get(&name)
            .ok_or_else(|| McpError::UnknownAction(action.to_string()))?;
        handler.execute(params)
    }

    /// Clear every collection and the audit trail, then record the reset
    pub fn reset(&self) -> McpResult<Envelope> {
        warn!("Memory reset requested");
        let _gate = self.gate.write();

        if let Err(e) = self.store.reset() {
            self.logs
                .record(RESET_ACTION, "{}", &e.to_string(), LogStatus::Error);
            error!(error = %e, "Reset failed");
            return Err(e);
        }
        let data = json!({ "reset": true });
        self.logs.clear_and_record(
            RESET_ACTION,
            "{}",
            &summarize_value(&data),
            LogStatus::Success,
        );
        Ok(Envelope::success(data, "Memory reset complete"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> ActionRouter {
        ActionRouter::with_default_actions(Arc::new(EntityStore::new()), Arc::new(LogManager::new()))
    }

    #[test]
    fn test_full_catalogue_registered() {
        let router = router();
        assert_eq!(router.action_count(), ActionName::ALL.len());
        let names: Vec<ActionName> = router.definitions().iter().map(|d| d.name).collect();
        assert_eq!(names, ActionName::ALL.to_vec());
    }

    #[test]
    fn test_success_envelope_and_log() {
        let router = router();
        let envelope = router
            .dispatch("add_user", json!({"username": "alice"}))
            .unwrap();

        assert!(envelope.success);
        assert_eq!(envelope.data["username"], "alice");
        assert_eq!(envelope.message, "Action 'add_user' completed successfully");

        let records = router.logs().list(None, None);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].action, "add_user");
        assert_eq!(records[0].status, LogStatus::Success);
        assert!(records[0].payload.params.contains("alice"));
    }

    #[test]
    fn test_domain_error_logged_once() {
        let router = router();
        router.dispatch("add_user", json!({"username": "alice"})).unwrap();
        let err = router
            .dispatch("add_user", json!({"username": "alice"}))
            .unwrap_err();

        assert!(matches!(err, McpError::DuplicateResource(_)));
        let records = router.logs().list(None, None);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].status, LogStatus::Error);
        assert_eq!(records[1].payload.result, "User alice already exists");
    }

    #[test]
    fn test_unknown_action_logged() {
        let router = router();
        let err = router.dispatch("not_a_real_action", json!({})).unwrap_err();

        assert!(matches!(err, McpError::UnknownAction(_)));
        let errors = router.logs().by_status(LogStatus::Error);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].action, "not_a_real_action");
    }

    #[test]
    fn test_registered_subset_only() {
        let store = Arc::new(EntityStore::new());
        let mut router = ActionRouter::new(store.clone(), Arc::new(LogManager::new()));
        router.register_action(Box::new(crate::actions::ListUsersAction::new(store)));

        assert!(router.dispatch("list_users", Value::Null).is_ok());
        assert!(matches!(
            router.dispatch("add_user", json!({"username": "x"})),
            Err(McpError::UnknownAction(_))
        ));
    }

    #[test]
    fn test_reset_clears_everything_and_leaves_one_record() {
        let router = router();
        router.dispatch("add_user", json!({"username": "alice"})).unwrap();
        router.dispatch("add_task", json!({"title": "t"})).unwrap();
        router
            .dispatch("update_config", json!({"key": "k", "value": 1}))
            .unwrap();

        let envelope = router.reset().unwrap();
        assert_eq!(envelope.data, json!({"reset": true}));

        assert_eq!(router.store().user_count(), 0);
        assert_eq!(router.store().task_count(), 0);
        assert!(router.store().get_config(Some("k")).is_err());
        assert!(router.store().get_config(Some("max_tasks")).is_ok());

        let records = router.logs().list(None, None);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].action, RESET_ACTION);

        let task = router.dispatch("add_task", json!({"title": "again"})).unwrap();
        assert_eq!(task.data["id"], 1);
    }
}
