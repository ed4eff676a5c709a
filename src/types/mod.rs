//! Data types for the Agent Memory server
//!
//! This module contains all the core data structures used throughout the application.

mod config_entry;
mod error;
mod log_record;
mod summary;
mod task;
mod user;

pub use config_entry::ConfigEntry;
pub use error::McpError;
pub use log_record::{LogPayload, LogRecord, LogStatus};
pub use summary::Summary;
pub use task::{NewTask, Task, TaskPatch, TaskPriority, TaskStatus};
pub use user::User;

/// Result type for store, log and dispatch operations
pub type McpResult<T> = Result<T, McpError>;

/// Open key/value mapping attached to users
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Default role for users created without one
pub fn default_role() -> String {
    "member".to_string()
}
