//! Agent Memory Server
//!
//! A shared-state and action-dispatch service that lets independent agents
//! read and mutate users, tasks and configuration through one named-action
//! protocol.
//!
//! # Features
//!
//! - **13 Actions**: user, task and config management plus two read-only utilities
//! - **Thread-Safe**: per-collection `RwLock`s, unique task ids under contention
//! - **Audit Trail**: one bounded log record per dispatched action
//! - **Rate Limiting**: fixed-window admission per client
//! - **Snapshots**: filtered, paginated read-only views of all state
//!
//! # Modules
//!
//! - `types`: Core data structures (User, Task, ConfigEntry, LogRecord) and `McpError`
//! - `store`: Entity store and persistence adapters
//! - `logs`: Bounded audit log
//! - `rate_limit`: Per-client request admission
//! - `protocol`: Action trait, action names and wire envelopes
//! - `actions`: One handler per action
//! - `server`: Action router
//! - `snapshot`: Read-only state views
//! - `auth`: API key guard
//! - `config`: Environment configuration
//! - `api`: axum HTTP surface
//! - `utils`: Clock, atomic writes, pagination
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use agent_memory::{ActionRouter, EntityStore, LogManager};
//! use serde_json::json;
//!
//! let store = Arc::new(EntityStore::new());
//! let logs = Arc::new(LogManager::new());
//! let router = ActionRouter::with_default_actions(store, logs);
//!
//! let response = router.dispatch("add_user", json!({"username": "alice"})).unwrap();
//! assert!(response.success);
//! ```

pub mod actions;
pub mod api;
pub mod auth;
pub mod config;
pub mod logs;
pub mod protocol;
pub mod rate_limit;
pub mod server;
pub mod snapshot;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::ServerConfig;
pub use logs::LogManager;
pub use protocol::{Action, ActionDefinition, ActionName, Envelope, QueryRequest};
pub use rate_limit::{RateLimit, RateLimiter};
pub use server::ActionRouter;
pub use snapshot::{SnapshotQuery, StateSnapshot};
pub use store::EntityStore;
pub use types::{
    ConfigEntry, LogRecord, LogStatus, McpError, McpResult, NewTask, Summary, Task, TaskPatch,
    TaskPriority, TaskStatus, User,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
