//! User operations

use std::vec;

use tracing::debug;

use crate::types::{default_role, McpError, McpResult, Metadata, User};

use super::EntityStore;

/// Create a user (thread-safe: holds the users write lock during the whole operation)
pub fn add_user(
    store: &EntityStore,
    username: &str,
    role: Option<String>,
    metadata: Option<Metadata>,
) -> McpResult<User> {
    if username.trim().is_empty() {
        return Err(McpError::invalid_input("username is required"));
    }

    let mut users = store.users.write();
    if users.iter().any(|u| u.username == username) {
        return Err(McpError::duplicate(format!(
            "User {} already exists",
            username
        )));
    }

    let user = User {
        username: username.to_string(),
        role: role.unwrap_or_else(default_role),
        metadata: metadata.unwrap_or_default(),
        created_at: store.clock.now(),
    };
    users.push(user.clone());

    if let Err(e) = store.persistence.save_users(&users) {
        users.pop();
        return Err(e);
    }

    debug!(username, "User added");
    Ok(user)
}

/// Delete a user. Tasks assigned to it keep their `assigned_to` value.
pub fn remove_user(store: &EntityStore, username: &str) -> McpResult<User> {
    let mut users = store.users.write();
    let index = users
        .iter()
        .position(|u| u.username == username)
        .ok_or_else(|| McpError::not_found(format!("User {} not found", username)))?;

    let removed = users.remove(index);
    if let Err(e) = store.persistence.save_users(&users) {
        users.insert(index, removed);
        return Err(e);
    }

    debug!(username, "User removed");
    Ok(removed)
}

pub fn get_user(store: &EntityStore, username: &str) -> McpResult<User> {
    store
        .users
        .read()
        .iter()
        .find(|u| u.username == username)
        .cloned()
        .ok_or_else(|| McpError::not_found(format!("User {} not found", username)))
}

/// Users in creation order. The iterator owns a copy of the collection, so it
/// can be cloned to walk the same sequence again.
pub fn list_users(store: &EntityStore) -> vec::IntoIter<User> {
    store.users.read().clone().into_iter()
}
