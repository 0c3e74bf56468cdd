mod config;
pub mod database;
mod memory;

pub use config::{Config, ConversionConfig, GoalConfig, SimulatorConfig};
pub use database::Database;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;

use crate::error::{Result, StorageError};

/// Returns `~/.config/strollscroll[-dev]/` based on STROLLSCROLL_ENV.
///
/// Set STROLLSCROLL_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the data directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STROLLSCROLL_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("strollscroll-dev")
    } else {
        base_dir.join("strollscroll")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
    Ok(dir)
}

/// A single local key-value store holding whole JSON records.
///
/// Writes replace the full value stored under a key; there is no partial patch.
pub trait KeyValueStore {
    /// Get the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Load a JSON record, treating a missing or unparseable value as absent.
///
/// # Errors
/// Only store access errors are returned; a corrupt record yields `Ok(None)`.
pub fn load_record<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(record) => Ok(Some(record)),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding corrupt record");
            Ok(None)
        }
    }
}

/// Serialize `record` as JSON and replace the value under `key`.
///
/// # Errors
/// Returns an error if serialization or the store write fails.
pub fn save_record<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, record: &T) -> Result<()> {
    let raw = serde_json::to_string(record)?;
    store.set(key, &raw)
}
