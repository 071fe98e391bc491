//! Instance-state persistence for the destroy-and-recreate cycle.
//!
//! This module provides the key-value store a `StatefulLayout` saves its
//! active state into, together with JSON file round-trip helpers so the
//! store survives a process restart.

use std::{
    collections::HashMap,
    fs::{create_dir_all, read_to_string, write},
    io::Error as StdError,
    path::Path,
};

use {
    serde::{Deserialize, Serialize},
    serde_json::{Error as SerdeJsonError, from_str, to_string_pretty},
    thiserror::Error,
    tracing::debug,
};

/// Fixed key under which a host window may nest its own opaque saved state
/// alongside the layout's entry.
pub const INSTANCE_STATE_KEY: &str = "instanceState";

/// Error type for instance-state persistence operations.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Failed to read or write the instance-state file.
    #[error("IO error: {0}")]
    IoError(#[from] StdError),
    /// Failed to serialize or deserialize the instance state.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] SerdeJsonError),
}

/// Serializable key-value store for saved instance state.
///
/// Values are opaque strings: the layout writes its active state name under
/// its own fixed key, and hosts may store additional entries (for example
/// their own serialized window state under [`INSTANCE_STATE_KEY`]) without
/// the layout inspecting them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceState {
    entries: HashMap<String, String>,
}

impl InstanceState {
    /// Creates an empty instance-state store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Removes and returns the entry stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// Returns whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Loads an instance-state store from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the file cannot be read or parsed.
    pub fn read_from(path: &Path) -> Result<Self, PersistenceError> {
        debug!("Loading instance state from {:?}", path);
        let contents = read_to_string(path)?;
        Ok(from_str(&contents)?)
    }

    /// Writes the store to a JSON file, creating parent directories as
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the file cannot be serialized or
    /// written.
    pub fn write_to(&self, path: &Path) -> Result<(), PersistenceError> {
        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }
        debug!("Writing instance state to {:?}", path);
        write(path, to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::persistence::{INSTANCE_STATE_KEY, InstanceState, PersistenceError};

    #[test]
    fn test_insert_and_get() {
        let mut store = InstanceState::new();
        assert!(store.is_empty());
        assert_eq!(store.get("stateful_layout_state"), None);

        store.insert("stateful_layout_state", "loading");
        assert_eq!(store.get("stateful_layout_state"), Some("loading"));

        store.insert("stateful_layout_state", "error");
        assert_eq!(store.get("stateful_layout_state"), Some("error"));

        assert_eq!(store.remove("stateful_layout_state"), Some("error".to_string()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("instance_state.json");

        let mut store = InstanceState::new();
        store.insert("stateful_layout_state", "empty");
        store.insert(INSTANCE_STATE_KEY, "{\"window_width\":800}");
        store.write_to(&path).unwrap();

        let restored = InstanceState::read_from(&path).unwrap();
        assert_eq!(restored, store);
        assert_eq!(restored.get("stateful_layout_state"), Some("empty"));
        assert_eq!(
            restored.get(INSTANCE_STATE_KEY),
            Some("{\"window_width\":800}")
        );
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = InstanceState::read_from(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(PersistenceError::IoError(_))));
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let mut store = InstanceState::new();
        store.insert("stateful_layout_state", "content");
        store.write_to(&path).unwrap();

        assert!(path.exists());
    }
}
