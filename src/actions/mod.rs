//! Action implementations
//!
//! This module contains all 13 actions organized by category:
//! - User actions (4): list, add, remove, get
//! - Task actions (5): list, add, update, delete, search
//! - Config actions (2): get, update
//! - Utility actions (2): calculate, summarize

pub mod config;
pub mod params;
pub mod tasks;
pub mod users;
pub mod utility;

use std::sync::Arc;

use crate::server::ActionRouter;
use crate::store::EntityStore;

// Re-export all actions for convenience
pub use config::{GetConfigAction, UpdateConfigAction};
pub use tasks::{
    AddTaskAction, DeleteTaskAction, ListTasksAction, SearchTasksAction, UpdateTaskAction,
};
pub use users::{AddUserAction, GetUserAction, ListUsersAction, RemoveUserAction};
pub use utility::{CalculateAction, SummarizeDataAction};

/// Register all actions with the router
pub fn register_all_actions(router: &mut ActionRouter, store: Arc<EntityStore>) {
    // User actions (4)
    router.register_action(Box::new(ListUsersAction::new(store.clone())));
    router.register_action(Box::new(AddUserAction::new(store.clone())));
    router.register_action(Box::new(RemoveUserAction::new(store.clone())));
    router.register_action(Box::new(GetUserAction::new(store.clone())));

    // Task actions (5)
    router.register_action(Box::new(ListTasksAction::new(store.clone())));
    router.register_action(Box::new(AddTaskAction::new(store.clone())));
    router.register_action(Box::new(UpdateTaskAction::new(store.clone())));
    router.register_action(Box::new(DeleteTaskAction::new(store.clone())));
    router.register_action(Box::new(SearchTasksAction::new(store.clone())));

    // Config actions (2)
    router.register_action(Box::new(GetConfigAction::new(store.clone())));
    router.register_action(Box::new(UpdateConfigAction::new(store.clone())));

    // Utility actions (2)
    router.register_action(Box::new(CalculateAction::new()));
    router.register_action(Box::new(SummarizeDataAction::new(store)));
}
