//! Read-only views over the store and the audit trail
//!
//! Each collection is read under its own lock, so a full snapshot is
//! consistent per collection but not across collections.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::logs::LogManager;
use crate::store::EntityStore;
use crate::types::{McpError, McpResult, TaskStatus};
use crate::utils::paginate;

/// Collections a snapshot can be narrowed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Users,
    Tasks,
    Config,
    Logs,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Users,
        EntityKind::Tasks,
        EntityKind::Config,
        EntityKind::Logs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Users => "users",
            EntityKind::Tasks => "tasks",
            EntityKind::Config => "config",
            EntityKind::Logs => "logs",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = McpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                McpError::invalid_input(format!(
                    "Invalid entity '{}'. Valid options: users, tasks, config, logs",
                    s
                ))
            })
    }
}

/// Snapshot request, as it arrives on the query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotQuery {
    pub entity: Option<String>,
    pub status: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl SnapshotQuery {
    pub fn entity(kind: EntityKind) -> Self {
        Self {
            entity: Some(kind.as_str().to_string()),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn page(mut self, limit: Option<usize>, offset: Option<usize>) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }
}

pub struct StateSnapshot {
    store: Arc<EntityStore>,
    logs: Arc<LogManager>,
}

impl StateSnapshot {
    pub fn new(store: Arc<EntityStore>, logs: Arc<LogManager>) -> Self {
        Self { store, logs }
    }

    /// Build the view described by `query`. Never mutates anything.
    pub fn snapshot(&self, query: &SnapshotQuery) -> McpResult<Value> {
        let entity = query.entity.as_deref().map(EntityKind::from_str).transpose()?;
        let status = query
            .status
            .as_deref()
            .map(TaskStatus::from_str)
            .transpose()?;

        match entity {
            None => self.full(status, query.limit, query.offset),
            Some(EntityKind::Users) => {
                let users: Vec<_> = self.store.list_users().collect();
                let total = users.len();
                let page = paginate(users, query.offset, query.limit);
                Ok(json!({ "users": page, "total": total, "count": page.len() }))
            }
            Some(EntityKind::Tasks) => {
                // `total` ignores the status filter; `count` is the filtered page
                let total = self.store.task_count();
                let tasks = self.store.list_tasks(status, None);
                let page = paginate(tasks, query.offset, query.limit);
                let mut body = json!({ "tasks": page, "total": total, "count": page.len() });
                if let Some(status) = status {
                    body["filtered_by_status"] = json!(status);
                }
                Ok(body)
            }
            Some(EntityKind::Config) => {
                let config = self.config_page(query.limit, query.offset)?;
                Ok(json!({ "config": config }))
            }
            Some(EntityKind::Logs) => {
                let total = self.logs.count();
                let page = self.logs.list(query.limit, query.offset);
                Ok(json!({ "logs": page, "total": total, "count": page.len() }))
            }
        }
    }

    fn full(
        &self,
        status: Option<TaskStatus>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> McpResult<Value> {
        let users: Vec<_> = self.store.list_users().collect();
        let tasks = self.store.list_tasks(status, None);
        let config = self.config_page(limit, offset)?;
        let logs = self.logs.list(limit, offset);

        let stats = json!({
            "total_users": users.len(),
            "total_tasks": self.store.task_count(),
            "total_config": self.store.config_count(),
            "total_logs": self.logs.count(),
        });

        Ok(json!({
            "users": paginate(users, offset, limit),
            "tasks": paginate(tasks, offset, limit),
            "config": config,
            "logs": logs,
            "stats": stats,
        }))
    }

    fn config_page(&self, limit: Option<usize>, offset: Option<usize>) -> McpResult<Map<String, Value>> {
        let entries = self.store.get_config(None)?;
        Ok(paginate(entries.into_iter().collect(), offset, limit)
            .into_iter()
            .collect())
    }
}
