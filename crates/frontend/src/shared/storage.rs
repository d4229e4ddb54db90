//! Durable key/value storage.
//!
//! Best effort: failures are logged and reads fall back to `None`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use web_sys::window;

pub const AUTH_STORAGE_KEY: &str = "auth-storage";
pub const APP_STORAGE_KEY: &str = "app-storage";
pub const SESSION_STORAGE_KEY: &str = "sb-session";

const APP_KEYS: [&str; 3] = [AUTH_STORAGE_KEY, APP_STORAGE_KEY, SESSION_STORAGE_KEY];

pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`, looked up on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

fn local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        let storage = local_storage()?;
        match storage.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("localStorage read of '{}' failed: {:?}", key, e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = local_storage() else {
            log::warn!("localStorage unavailable, '{}' not saved", key);
            return;
        };
        if let Err(e) = storage.set_item(key, value) {
            log::warn!("localStorage write of '{}' failed: {:?}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = local_storage() {
            if let Err(e) = storage.remove_item(key) {
                log::warn!("localStorage remove of '{}' failed: {:?}", key, e);
            }
        }
    }
}

/// Process-local storage for tests and non-browser targets
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.set(key, value);
        storage
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

pub fn use_storage() -> Arc<dyn KeyValueStorage> {
    leptos::prelude::use_context::<Arc<dyn KeyValueStorage>>()
        .expect("Storage not provided in context (provide it in App)")
}

/// Bytes held under the keys this app writes
pub fn stored_bytes(storage: &dyn KeyValueStorage) -> u64 {
    APP_KEYS
        .iter()
        .filter_map(|key| storage.get(key))
        .map(|value| value.len() as u64)
        .sum()
}

// ============================================================================
// JSON helpers
// ============================================================================

/// Versioned wrapper around a persisted snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persisted<S> {
    pub state: S,
    #[serde(default)]
    pub version: u32,
}

pub fn load_json<T: DeserializeOwned>(storage: &dyn KeyValueStorage, key: &str) -> Option<T> {
    let raw = storage.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring corrupt '{}' entry: {}", key, e);
            None
        }
    }
}

pub fn save_json<T: Serialize>(storage: &dyn KeyValueStorage, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => storage.set(key, &raw),
        Err(e) => log::warn!("Could not serialize '{}': {}", key, e),
    }
}

/// Reads the `state` of a `{ state, version }` envelope
pub fn load_state<S: DeserializeOwned>(storage: &dyn KeyValueStorage, key: &str) -> Option<S> {
    load_json::<Persisted<S>>(storage, key).map(|p| p.state)
}

pub fn save_state<S: Serialize>(storage: &dyn KeyValueStorage, key: &str, state: S) {
    save_json(storage, key, &Persisted { state, version: 0 });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        flag: bool,
    }

    #[test]
    fn test_state_is_wrapped_in_envelope() {
        let storage = MemoryStorage::new();
        save_state(&storage, "k", Sample { flag: true });
        assert_eq!(
            storage.get("k").as_deref(),
            Some(r#"{"state":{"flag":true},"version":0}"#)
        );
        assert_eq!(load_state::<Sample>(&storage, "k"), Some(Sample { flag: true }));
    }

    #[test]
    fn test_corrupt_entries_read_as_none() {
        let storage = MemoryStorage::with_entry("k", "{not json");
        assert_eq!(load_state::<Sample>(&storage, "k"), None);
        assert_eq!(load_state::<Sample>(&storage, "missing"), None);
    }

    #[test]
    fn test_remove_deletes_entry() {
        let storage = MemoryStorage::with_entry("k", "v");
        storage.remove("k");
        assert_eq!(storage.get("k"), None);
    }

    #[test]
    fn test_stored_bytes_counts_app_keys_only() {
        let storage = MemoryStorage::with_entry(AUTH_STORAGE_KEY, "{}");
        storage.set(SESSION_STORAGE_KEY, "é");
        storage.set("other-app", "ignored");
        assert_eq!(stored_bytes(&storage), 4);
        assert_eq!(stored_bytes(&MemoryStorage::new()), 0);
    }
}
