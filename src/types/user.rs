//! User type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{default_role, Metadata};

/// A caller-visible user. Identity is `username`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub metadata: Metadata,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the default role and empty metadata
    pub fn new(username: String, created_at: DateTime<Utc>) -> Self {
        Self {
            username,
            role: default_role(),
            metadata: Metadata::new(),
            created_at,
        }
    }
}
