//! Persistence adapters for the entity store
//!
//! The store calls a [`Persistence`] after every mutation while it still holds
//! the collection's write lock, so each saved document is a consistent view of
//! one collection.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::types::{ConfigEntry, McpError, McpResult, Task, User};
use crate::utils::atomic::atomic_write_json;

/// Everything a store needs to resume after a restart
#[derive(Debug, Clone, Default)]
pub struct PersistedState {
    pub users: Vec<User>,
    pub tasks: Vec<Task>,
    /// Next id to hand out; `None` means derive it from `tasks`
    pub next_task_id: Option<u64>,
    /// `None` means no config was ever saved; the store seeds defaults
    pub config: Option<BTreeMap<String, ConfigEntry>>,
}

/// Durable backing for the entity collections.
///
/// Any failure is reported as [`McpError::StorageFailure`].
pub trait Persistence: Send + Sync {
    fn load(&self) -> McpResult<PersistedState>;

    fn save_users(&self, users: &[User]) -> McpResult<()>;

    fn save_tasks(&self, tasks: &[Task], next_task_id: u64) -> McpResult<()>;

    fn save_config(&self, config: &BTreeMap<String, ConfigEntry>) -> McpResult<()>;

    /// Short name for diagnostics
    fn describe(&self) -> String;
}

/// Keeps nothing; state lives only as long as the process
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryPersistence;

impl Persistence for MemoryPersistence {
    fn load(&self) -> McpResult<PersistedState> {
        Ok(PersistedState::default())
    }

    fn save_users(&self, _users: &[User]) -> McpResult<()> {
        Ok(())
    }

    fn save_tasks(&self, _tasks: &[Task], _next_task_id: u64) -> McpResult<()> {
        Ok(())
    }

    fn save_config(&self, _config: &BTreeMap<String, ConfigEntry>) -> McpResult<()> {
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[derive(Serialize, Deserialize)]
struct TasksDocument {
    next_task_id: u64,
    tasks: Vec<Task>,
}

/// One JSON document per collection inside a data directory
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    data_dir: PathBuf,
}

impl JsonFilePersistence {
    const USERS_FILE: &'static str = "users.json";
    const TASKS_FILE: &'static str = "tasks.json";
    const CONFIG_FILE: &'static str = "config.json";

    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn read_document<T: for<'de> Deserialize<'de>>(&self, name: &str) -> McpResult<Option<T>> {
        let path = self.data_dir.join(name);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let doc = serde_json::from_str(&content).map_err(|e| {
            McpError::storage(format!("Corrupt {}: {}", path.display(), e))
        })?;
        Ok(Some(doc))
    }
}

impl Persistence for JsonFilePersistence {
    fn load(&self) -> McpResult<PersistedState> {
        let users: Vec<User> = self.read_document(Self::USERS_FILE)?.unwrap_or_default();
        let tasks_doc: Option<TasksDocument> = self.read_document(Self::TASKS_FILE)?;
        let config = self.read_document(Self::CONFIG_FILE)?;

        let (tasks, next_task_id) = match tasks_doc {
            Some(doc) => (doc.tasks, Some(doc.next_task_id)),
            None => (Vec::new(), None),
        };

        info!(
            users = users.len(),
            tasks = tasks.len(),
            dir = %self.data_dir.display(),
            "Loaded persisted state"
        );

        Ok(PersistedState {
            users,
            tasks,
            next_task_id,
            config,
        })
    }

    fn save_users(&self, users: &[User]) -> McpResult<()> {
        debug!(count = users.len(), "Saving users");
        atomic_write_json(self.data_dir.join(Self::USERS_FILE), users)
    }

    fn save_tasks(&self, tasks: &[Task], next_task_id: u64) -> McpResult<()> {
        debug!(count = tasks.len(), next_task_id, "Saving tasks");
        let doc = TasksDocument {
            next_task_id,
            tasks: tasks.to_vec(),
        };
        atomic_write_json(self.data_dir.join(Self::TASKS_FILE), &doc)
    }

    fn save_config(&self, config: &BTreeMap<String, ConfigEntry>) -> McpResult<()> {
        debug!(count = config.len(), "Saving config");
        atomic_write_json(self.data_dir.join(Self::CONFIG_FILE), config)
    }

    fn describe(&self) -> String {
        format!("json:{}", self.data_dir.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::tempdir;

    #[test]
    fn test_missing_files_load_as_empty() {
        let dir = tempdir().unwrap();
        let state = JsonFilePersistence::new(dir.path()).load().unwrap();
        assert!(state.users.is_empty());
        assert!(state.tasks.is_empty());
        assert!(state.next_task_id.is_none());
        assert!(state.config.is_none());
    }

    #[test]
    fn test_saved_collections_load_back() {
        let dir = tempdir().unwrap();
        let persistence = JsonFilePersistence::new(dir.path());

        persistence
            .save_users(&[User::new("alice".to_string(), Utc::now())])
            .unwrap();
        persistence.save_tasks(&[], 7).unwrap();

        let state = persistence.load().unwrap();
        assert_eq!(state.users.len(), 1);
        assert_eq!(state.users[0].username, "alice");
        assert_eq!(state.next_task_id, Some(7));
    }

    #[test]
    fn test_corrupt_document_is_storage_failure() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("users.json"), "{not json").unwrap();

        let err = JsonFilePersistence::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, McpError::StorageFailure(_)));
    }
}
