//! Action catalogue types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{McpError, McpResult};

/// Every action a caller can dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionName {
    ListUsers,
    AddUser,
    RemoveUser,
    GetUser,
    ListTasks,
    AddTask,
    UpdateTask,
    DeleteTask,
    SearchTasks,
    GetConfig,
    UpdateConfig,
    Calculate,
    SummarizeData,
}

impl ActionName {
    pub const ALL: [ActionName; 13] = [
        ActionName::ListUsers,
        ActionName::AddUser,
        ActionName::RemoveUser,
        ActionName::GetUser,
        ActionName::ListTasks,
        ActionName::AddTask,
        ActionName::UpdateTask,
        ActionName::DeleteTask,
        ActionName::SearchTasks,
        ActionName::GetConfig,
        ActionName::UpdateConfig,
        ActionName::Calculate,
        ActionName::SummarizeData,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionName::ListUsers => "list_users",
            ActionName::AddUser => "add_user",
            ActionName::RemoveUser => "remove_user",
            ActionName::GetUser => "get_user",
            ActionName::ListTasks => "list_tasks",
            ActionName::AddTask => "add_task",
            ActionName::UpdateTask => "update_task",
            ActionName::DeleteTask => "delete_task",
            ActionName::SearchTasks => "search_tasks",
            ActionName::GetConfig => "get_config",
            ActionName::UpdateConfig => "update_config",
            ActionName::Calculate => "calculate",
            ActionName::SummarizeData => "summarize_data",
        }
    }
}

impl FromStr for ActionName {
    type Err = McpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| McpError::UnknownAction(s.to_string()))
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action definition served by the actions listing
#[derive(Serialize, Debug, Clone)]
pub struct ActionDefinition {
    pub name: ActionName,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ActionDefinition {
    pub fn new(name: ActionName, description: impl Into<String>, input_schema: Value) -> Self {
        Self {
            name,
            description: description.into(),
            input_schema,
        }
    }
}

/// Trait for dispatchable actions
///
/// All actions must implement this trait to be registered with the router.
pub trait Action: Send + Sync {
    /// Get the action definition for the catalogue
    fn definition(&self) -> ActionDefinition;

    /// Decode `params` and run the action
    fn execute(&self, params: Value) -> McpResult<Value>;

    /// Get the action name (convenience method)
    fn name(&self) -> ActionName {
        self.definition().name
    }
}
