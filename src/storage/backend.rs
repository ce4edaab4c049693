//! Key/blob storage backends for the row collection

use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use fs4::fs_std::FileExt;
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// Durable get/put of one serialized blob per key
#[async_trait]
pub trait RowStorage: Send + Sync {
    /// Read the blob stored under `key`, `None` if never written
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the blob stored under `key`
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Exclusive hold on `key` across every process sharing the backend
    ///
    /// Backends private to one process have nobody to exclude.
    async fn lock(&self, _key: &str) -> Result<KeyLock> {
        Ok(KeyLock::default())
    }
}

/// Held key lock, released on drop
#[derive(Debug, Default)]
pub struct KeyLock {
    _file: Option<std::fs::File>,
}

/// In-process storage, lost on restart
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RowStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

/// Local file system storage, one `<key>.json` file per key
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage instance, creating the directory if needed
    pub async fn new(base_path: impl AsRef<Path>) -> Result<Self> {
        let path = base_path.as_ref().to_path_buf();

        if !path.exists() {
            fs::create_dir_all(&path).await.map_err(|e| {
                GatewayError::storage(format!("Failed to create storage directory: {}", e))
            })?;
        }

        info!("Row file storage initialized at: {}", path.display());
        Ok(Self { base_path: path })
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }

    fn lock_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.lock", key))
    }
}

#[async_trait]
impl RowStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.file_path(key);

        match fs::read(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GatewayError::storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let path = self.file_path(key);
        // Write-then-rename so readers never observe a half-written collection
        let tmp_path = self
            .base_path
            .join(format!(".{}.{}.tmp", key, Uuid::new_v4()));

        let mut file = fs::File::create(&tmp_path)
            .await
            .map_err(|e| GatewayError::storage(format!("Failed to create file: {}", e)))?;
        file.write_all(&value)
            .await
            .map_err(|e| GatewayError::storage(format!("Failed to write file: {}", e)))?;
        file.sync_all()
            .await
            .map_err(|e| GatewayError::storage(format!("Failed to sync file: {}", e)))?;
        drop(file);

        if let Err(e) = fs::rename(&tmp_path, &path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(GatewayError::storage(format!(
                "Failed to replace {}: {}",
                path.display(),
                e
            )));
        }

        debug!(key, bytes = value.len(), "Row blob stored");
        Ok(())
    }

    async fn lock(&self, key: &str) -> Result<KeyLock> {
        let path = self.lock_path(key);

        // flock blocks the calling thread until the holder releases it
        let file = tokio::task::spawn_blocking(move || {
            let file = OpenOptions::new()
                .create(true)
                .truncate(false)
                .write(true)
                .open(&path)?;
            FileExt::lock_exclusive(&file)?;
            Ok::<_, std::io::Error>(file)
        })
        .await
        .map_err(|e| GatewayError::storage(format!("Lock task failed: {}", e)))?
        .map_err(|e| GatewayError::storage(format!("Failed to lock '{}': {}", key, e)))?;

        Ok(KeyLock { _file: Some(file) })
    }
}
