//! Storage layer for the gateway
//!
//! This module persists the prompt row collection.

/// Key/blob backends
pub mod backend;
/// Row collection store
pub mod rows;

pub use backend::{FileStorage, KeyLock, MemoryStorage, RowStorage};
pub use rows::RowStore;

use crate::config::{StorageBackend, StorageConfig};
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::info;

/// Open the configured backend
pub async fn open_backend(config: &StorageConfig) -> Result<Arc<dyn RowStorage>> {
    let backend: Arc<dyn RowStorage> = match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory row storage");
            Arc::new(MemoryStorage::new())
        }
        StorageBackend::File => Arc::new(FileStorage::new(&config.path).await?),
    };
    Ok(backend)
}

/// Open the configured backend and wrap it in a row store
pub async fn open_row_store(config: &StorageConfig) -> Result<RowStore> {
    let backend = open_backend(config).await?;
    Ok(RowStore::new(backend, config.key.clone()))
}
