//! The persisted prompt row collection
//!
//! All rows live in one serialized JSON array under a single storage key.
//! Every mutation is a read-modify-write of the whole collection. The store
//! mutex serializes callers sharing this instance; the backend key lock
//! serializes other instances and processes on the same storage.

use super::backend::{KeyLock, RowStorage};
use crate::core::batch::types::{PromptRef, PromptRow, RowStatus};
use crate::utils::error::{GatewayError, Result};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Ordered, id-unique collection of prompt rows
pub struct RowStore {
    storage: Arc<dyn RowStorage>,
    key: String,
    lock: Mutex<()>,
}

impl RowStore {
    pub fn new(storage: Arc<dyn RowStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            lock: Mutex::new(()),
        }
    }

    /// Storage key the collection lives under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Append rows whose id is not stored yet, as `not_submitted`
    ///
    /// Returns the number of rows appended.
    pub async fn add_prompts(&self, prompts: Vec<PromptRef>) -> Result<usize> {
        let _held = self.exclusive().await?;
        let mut rows = self.load().await?;

        let mut seen: HashSet<String> = rows.iter().map(|row| row.id.clone()).collect();
        let before = rows.len();
        for prompt in prompts {
            if seen.insert(prompt.id.clone()) {
                rows.push(PromptRow::from(prompt));
            }
        }

        let added = rows.len() - before;
        if added > 0 {
            self.save(&rows).await?;
        }
        debug!(added, total = rows.len(), "Prompts added");
        Ok(added)
    }

    /// Mark rows as `queued` under `batch_id`
    ///
    /// Ids not stored yet are appended. Stored ids are reset in place to a
    /// fresh `queued` row under the new batch. Within one call the first
    /// occurrence of an id wins.
    pub async fn register_batch(&self, batch_id: &str, prompts: Vec<PromptRef>) -> Result<()> {
        let _held = self.exclusive().await?;
        let mut rows = self.load().await?;

        let mut positions: HashMap<String, usize> = rows
            .iter()
            .enumerate()
            .map(|(index, row)| (row.id.clone(), index))
            .collect();
        let mut registered = HashSet::new();

        for prompt in prompts {
            if !registered.insert(prompt.id.clone()) {
                continue;
            }
            let row = PromptRow::queued(prompt.id, prompt.prompt, batch_id);
            match positions.get(&row.id) {
                Some(&index) => rows[index] = row,
                None => {
                    positions.insert(row.id.clone(), rows.len());
                    rows.push(row);
                }
            }
        }

        self.save(&rows).await?;
        debug!(batch_id, rows = registered.len(), "Batch registered");
        Ok(())
    }

    /// Drop every row whose id is in `ids`, returning how many were removed
    pub async fn remove_rows(&self, ids: &HashSet<String>) -> Result<usize> {
        let _held = self.exclusive().await?;
        let mut rows = self.load().await?;

        let before = rows.len();
        rows.retain(|row| !ids.contains(&row.id));
        let removed = before - rows.len();

        if removed > 0 {
            self.save(&rows).await?;
        }
        debug!(removed, "Rows removed");
        Ok(removed)
    }

    /// Replace stored rows by id, returning how many were replaced
    ///
    /// Updates without a stored counterpart are dropped.
    pub async fn update_rows(&self, updates: Vec<PromptRow>) -> Result<usize> {
        let _held = self.exclusive().await?;
        let mut rows = self.load().await?;

        let mut by_id: HashMap<String, PromptRow> = updates
            .into_iter()
            .map(|row| (row.id.clone(), row))
            .collect();

        let mut replaced = 0;
        for row in rows.iter_mut() {
            if let Some(update) = by_id.remove(&row.id) {
                *row = update;
                replaced += 1;
            }
        }

        if replaced > 0 {
            self.save(&rows).await?;
        }
        if !by_id.is_empty() {
            debug!(dropped = by_id.len(), "Updates without a stored row dropped");
        }
        Ok(replaced)
    }

    /// The full collection in stored order
    pub async fn list_rows(&self) -> Result<Vec<PromptRow>> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    /// Rows that may be submitted: never submitted or failed
    pub async fn pending_rows(&self) -> Result<Vec<PromptRow>> {
        Ok(self
            .list_rows()
            .await?
            .into_iter()
            .filter(|row| row.status.is_pending())
            .collect())
    }

    /// Row counts per status
    pub async fn status_counts(&self) -> Result<HashMap<RowStatus, usize>> {
        let mut counts = HashMap::new();
        for row in self.list_rows().await? {
            *counts.entry(row.status).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Replace rows that still match the copy an update was computed from
    ///
    /// Each change is `(expected, update)`. A row that was removed, re-added
    /// or re-registered since `expected` was read is left alone. Returns the
    /// ids that were replaced.
    pub async fn update_rows_if_unchanged(
        &self,
        changes: Vec<(PromptRow, PromptRow)>,
    ) -> Result<HashSet<String>> {
        let _held = self.exclusive().await?;
        let mut rows = self.load().await?;

        let mut by_id: HashMap<String, (PromptRow, PromptRow)> = changes
            .into_iter()
            .map(|(expected, update)| (update.id.clone(), (expected, update)))
            .collect();

        let mut replaced = HashSet::new();
        for row in rows.iter_mut() {
            if let Some((expected, update)) = by_id.remove(&row.id) {
                if *row == expected {
                    *row = update;
                    replaced.insert(row.id.clone());
                } else {
                    debug!(id = %row.id, "Row changed since read, update dropped");
                }
            }
        }

        if !replaced.is_empty() {
            self.save(&rows).await?;
        }
        Ok(replaced)
    }

    async fn exclusive(&self) -> Result<(MutexGuard<'_, ()>, KeyLock)> {
        let guard = self.lock.lock().await;
        let key_lock = self.storage.lock(&self.key).await?;
        Ok((guard, key_lock))
    }

    async fn load(&self) -> Result<Vec<PromptRow>> {
        match self.storage.get(&self.key).await? {
            None => Ok(Vec::new()),
            Some(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                GatewayError::storage(format!(
                    "Stored collection '{}' is not a valid row list: {}",
                    self.key, e
                ))
            }),
        }
    }

    async fn save(&self, rows: &[PromptRow]) -> Result<()> {
        let bytes = serde_json::to_vec(rows)?;
        self.storage.put(&self.key, bytes).await
    }
}

impl std::fmt::Debug for RowStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowStore").field("key", &self.key).finish()
    }
}
