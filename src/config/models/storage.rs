//! Row storage configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Storage backend holding the row collection blob
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Process memory, lost on restart
    Memory,
    /// One JSON file per key on local disk
    #[default]
    File,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend kind
    #[serde(default)]
    pub backend: StorageBackend,
    /// Base directory for the file backend
    #[serde(default = "default_storage_path")]
    pub path: String,
    /// Logical key the row collection lives under
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_storage_path(),
            key: default_storage_key(),
        }
    }
}

impl StorageConfig {
    /// Merge storage configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.backend != StorageBackend::default() {
            self.backend = other.backend;
        }
        if other.path != default_storage_path() {
            self.path = other.path;
        }
        if other.key != default_storage_key() {
            self.key = other.key;
        }
        self
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.key.is_empty() {
            return Err("Storage key cannot be empty".to_string());
        }
        if !self
            .key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(format!(
                "Storage key may only contain letters, digits, '-' and '_': {}",
                self.key
            ));
        }
        if self.backend == StorageBackend::File && self.path.is_empty() {
            return Err("Storage path is required for the file backend".to_string());
        }
        Ok(())
    }
}
