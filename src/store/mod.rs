//! Entity Store - shared mutable state
//!
//! Owns the Users, Tasks and Config collections. Each collection sits behind
//! its own `RwLock`: writers to one collection exclude each other, readers run
//! concurrently and only ever see whole records. No operation spans two
//! collections except `reset`, which takes the locks in a fixed order
//! (users, tasks, config).

mod config;
mod persistence;
mod tasks;
mod users;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::vec;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{info, warn};

use crate::types::{
    ConfigEntry, McpResult, Metadata, NewTask, Task, TaskPatch, TaskStatus, User,
};
use crate::utils::{Clock, SystemClock};

pub use persistence::{JsonFilePersistence, MemoryPersistence, PersistedState, Persistence};

/// Entity store with internal synchronization; share it through an `Arc`
pub struct EntityStore {
    pub(crate) users: RwLock<Vec<User>>,
    pub(crate) tasks: RwLock<Vec<Task>>,
    pub(crate) next_task_id: AtomicU64,
    pub(crate) config: RwLock<BTreeMap<String, ConfigEntry>>,
    pub(crate) persistence: Box<dyn Persistence>,
    pub(crate) clock: Arc<dyn Clock>,
}

impl EntityStore {
    /// Create an empty in-memory store with default config
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock::new()))
    }

    /// Create an empty in-memory store driven by `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let config = config::default_entries(clock.now());
        Self {
            users: RwLock::new(Vec::new()),
            tasks: RwLock::new(Vec::new()),
            next_task_id: AtomicU64::new(1),
            config: RwLock::new(config),
            persistence: Box::new(MemoryPersistence),
            clock,
        }
    }

    /// Create a store backed by `persistence`, resuming whatever it holds
    pub fn with_persistence(
        persistence: Box<dyn Persistence>,
        clock: Arc<dyn Clock>,
    ) -> McpResult<Self> {
        let state = persistence.load()?;

        let derived_next = state.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let next_task_id = match state.next_task_id {
            Some(next) if next >= derived_next => next,
            Some(next) => {
                warn!(next, derived_next, "Persisted task counter behind stored tasks");
                derived_next
            }
            None => derived_next,
        };

        let config = match state.config {
            Some(config) => config,
            None => config::default_entries(clock.now()),
        };

        let mut tasks = state.tasks;
        tasks.sort_by_key(|t| t.id);

        info!(backend = %persistence.describe(), next_task_id, "Entity store ready");

        Ok(Self {
            users: RwLock::new(state.users),
            tasks: RwLock::new(tasks),
            next_task_id: AtomicU64::new(next_task_id),
            config: RwLock::new(config),
            persistence,
            clock,
        })
    }

    /// Clear every collection back to its initial state
    pub fn reset(&self) -> McpResult<()> {
        let mut users = self.users.write();
        let mut tasks = self.tasks.write();
        let mut config = self.config.write();

        let defaults = config::default_entries(self.clock.now());
        let saved = self
            .persistence
            .save_users(&[])
            .and_then(|_| self.persistence.save_tasks(&[], 1))
            .and_then(|_| self.persistence.save_config(&defaults));

        if let Err(e) = saved {
            // Best effort: rewrite documents that were already cleared
            let next_id = self.next_task_id.load(Ordering::SeqCst);
            if let Err(restore) = self.persistence.save_users(&users) {
                warn!(error = %restore, "Failed to restore users after reset failure");
            }
            if let Err(restore) = self.persistence.save_tasks(&tasks, next_id) {
                warn!(error = %restore, "Failed to restore tasks after reset failure");
            }
            if let Err(restore) = self.persistence.save_config(&config) {
                warn!(error = %restore, "Failed to restore config after reset failure");
            }
            return Err(e);
        }

        users.clear();
        tasks.clear();
        self.next_task_id.store(1, Ordering::SeqCst);
        *config = defaults;

        warn!("Entity store reset");
        Ok(())
    }

    pub fn user_count(&self) -> usize {
        self.users.read().len()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.read().len()
    }

    pub fn config_count(&self) -> usize {
        self.config.read().len()
    }

    /// Id the next created task will receive
    pub fn peek_next_task_id(&self) -> u64 {
        self.next_task_id.load(Ordering::SeqCst)
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

// Collection operations live in submodules
impl EntityStore {
    // Users (from users.rs)
    pub fn add_user(
        &self,
        username: &str,
        role: Option<String>,
        metadata: Option<Metadata>,
    ) -> McpResult<User> {
        users::add_user(self, username, role, metadata)
    }

    pub fn remove_user(&self, username: &str) -> McpResult<User> {
        users::remove_user(self, username)
    }

    pub fn get_user(&self, username: &str) -> McpResult<User> {
        users::get_user(self, username)
    }

    pub fn list_users(&self) -> vec::IntoIter<User> {
        users::list_users(self)
    }

    // Tasks (from tasks.rs)
    pub fn add_task(&self, new_task: NewTask) -> McpResult<Task> {
        tasks::add_task(self, new_task)
    }

    pub fn update_task(&self, id: u64, patch: TaskPatch) -> McpResult<Task> {
        tasks::update_task(self, id, patch)
    }

    pub fn delete_task(&self, id: u64) -> McpResult<Task> {
        tasks::delete_task(self, id)
    }

    pub fn get_task(&self, id: u64) -> McpResult<Task> {
        tasks::get_task(self, id)
    }

    pub fn list_tasks(&self, status: Option<TaskStatus>, assigned_to: Option<&str>) -> Vec<Task> {
        tasks::list_tasks(self, status, assigned_to)
    }

    pub fn search_tasks(&self, query: &str) -> McpResult<Vec<Task>> {
        tasks::search_tasks(self, query)
    }

    // Config (from config.rs)
    pub fn get_config(&self, key: Option<&str>) -> McpResult<BTreeMap<String, Value>> {
        config::get_config(self, key)
    }

    pub fn get_config_entry(&self, key: &str) -> McpResult<ConfigEntry> {
        config::get_config_entry(self, key)
    }

    pub fn update_config(&self, key: &str, value: Value) -> McpResult<ConfigEntry> {
        config::update_config(self, key, value)
    }
}
