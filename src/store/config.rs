//! Config operations

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tracing::debug;

use crate::types::{ConfigEntry, McpError, McpResult};

use super::EntityStore;

/// Entries present on a fresh or reset store
pub fn default_entries(now: DateTime<Utc>) -> BTreeMap<String, ConfigEntry> {
    [("max_tasks", json!(100)), ("default_priority", json!("medium"))]
        .into_iter()
        .map(|(key, value)| {
            (
                key.to_string(),
                ConfigEntry {
                    key: key.to_string(),
                    value,
                    updated_at: now,
                },
            )
        })
        .collect()
}

/// One entry as `{key: value}`, or every entry when `key` is `None`
pub fn get_config(store: &EntityStore, key: Option<&str>) -> McpResult<BTreeMap<String, Value>> {
    match key {
        Some(key) => {
            let entry = get_config_entry(store, key)?;
            Ok(BTreeMap::from([(entry.key, entry.value)]))
        }
        None => Ok(store
            .config
            .read()
            .values()
            .map(|e| (e.key.clone(), e.value.clone()))
            .collect()),
    }
}

pub fn get_config_entry(store: &EntityStore, key: &str) -> McpResult<ConfigEntry> {
    store
        .config
        .read()
        .get(key)
        .cloned()
        .ok_or_else(|| McpError::not_found(format!("Config key {} not found", key)))
}

/// Insert or overwrite `key`
pub fn update_config(store: &EntityStore, key: &str, value: Value) -> McpResult<ConfigEntry> {
    if key.trim().is_empty() {
        return Err(McpError::invalid_input("key is required"));
    }

    let mut config = store.config.write();
    let entry = ConfigEntry {
        key: key.to_string(),
        value,
        updated_at: store.clock.now(),
    };
    let previous = config.insert(key.to_string(), entry.clone());

    if let Err(e) = store.persistence.save_config(&config) {
        match previous {
            Some(previous) => config.insert(key.to_string(), previous),
            None => config.remove(key),
        };
        return Err(e);
    }

    debug!(key, "Config updated");
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_store_has_defaults() {
        let store = EntityStore::new();
        let config = store.get_config(None).unwrap();
        assert_eq!(config["max_tasks"], 100);
        assert_eq!(config["default_priority"], "medium");
    }

    #[test]
    fn test_upsert_and_read_back() {
        let store = EntityStore::new();
        store.update_config("theme", json!({"dark": true})).unwrap();
        store.update_config("theme", json!({"dark": false})).unwrap();

        let config = store.get_config(Some("theme")).unwrap();
        assert_eq!(config.len(), 1);
        assert_eq!(config["theme"], json!({"dark": false}));
    }

    #[test]
    fn test_missing_key_and_empty_key() {
        let store = EntityStore::new();
        assert!(matches!(
            store.get_config(Some("missing")),
            Err(McpError::NotFound(_))
        ));
        assert!(matches!(
            store.update_config("", json!(1)),
            Err(McpError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_repeated_reads_are_identical() {
        let store = EntityStore::new();
        store.update_config("limits", json!([1, 2, 3])).unwrap();
        let first = store.get_config(Some("limits")).unwrap();
        let second = store.get_config(Some("limits")).unwrap();
        assert_eq!(first, second);
    }
}
