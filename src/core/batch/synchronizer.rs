//! Batch status synchronization
//!
//! One cycle polls every batch that still has queued or running rows, maps
//! the remote state onto those rows, pulls results for completed batches and
//! writes all changes back with a single store update. The store is not held
//! while remote calls run, so a change only lands on a row that still looks
//! the way it did when the cycle read it.

use super::client::BatchApi;
use super::jsonl::parse_results;
use super::types::{BatchObject, PromptRow, RowStatus, SyncOutcome, SyncReport};
use crate::storage::RowStore;
use crate::utils::error::Result;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Reconciles stored rows with remote batch state
pub struct BatchSynchronizer {
    api: Arc<dyn BatchApi>,
    store: Arc<RowStore>,
}

impl BatchSynchronizer {
    pub fn new(api: Arc<dyn BatchApi>, store: Arc<RowStore>) -> Self {
        Self { api, store }
    }

    /// Run one synchronization cycle
    ///
    /// Remote failures skip the affected batch until the next cycle; only
    /// storage failures are returned.
    pub async fn run_cycle(&self) -> Result<SyncOutcome> {
        let rows = self.store.list_rows().await?;
        let mut report = SyncReport::default();
        let mut changes: Vec<(PromptRow, PromptRow)> = Vec::new();

        for batch_id in active_batch_ids(&rows) {
            let batch = match self.api.retrieve_batch(&batch_id).await {
                Ok(batch) => batch,
                Err(e) => {
                    warn!(batch_id = %batch_id, error = %e, "Skipping batch, status query failed");
                    report.skipped += 1;
                    continue;
                }
            };
            report.checked += 1;

            let target = batch.batch_status().row_status();
            let results = match (target, batch.output_file_id.as_deref()) {
                (RowStatus::Completed, Some(file_id)) => self.fetch_results(&batch_id, file_id).await,
                _ => HashMap::new(),
            };

            debug!(
                batch_id = %batch_id,
                remote = %batch.status,
                target = %target,
                results = results.len(),
                "Batch status fetched"
            );

            changes.extend(
                rows.iter()
                    .filter(|row| row.batch_id.as_deref() == Some(batch_id.as_str()))
                    .filter_map(|row| {
                        apply_status(row, &batch, &results).map(|next| (row.clone(), next))
                    }),
            );
        }

        if changes.is_empty() {
            info!(
                checked = report.checked,
                skipped = report.skipped,
                "Sync cycle finished, no changes"
            );
            return Ok(SyncOutcome { rows, report });
        }

        let mut changed: HashMap<String, PromptRow> = changes
            .iter()
            .map(|(_, next)| (next.id.clone(), next.clone()))
            .collect();
        let replaced = self.store.update_rows_if_unchanged(changes).await?;
        changed.retain(|id, _| replaced.contains(id));
        report.updated = changed.len();

        info!(
            checked = report.checked,
            skipped = report.skipped,
            updated = report.updated,
            "Sync cycle finished"
        );

        let rows = rows
            .into_iter()
            .map(|row| changed.remove(&row.id).unwrap_or(row))
            .collect();

        Ok(SyncOutcome { rows, report })
    }

    async fn fetch_results(&self, batch_id: &str, file_id: &str) -> HashMap<String, String> {
        match self.api.file_content(file_id).await {
            Ok(content) => parse_results(&content),
            Err(e) => {
                warn!(
                    batch_id,
                    file_id,
                    error = %e,
                    "Failed to download batch output, rows complete without results"
                );
                HashMap::new()
            }
        }
    }
}

/// Distinct batch ids of queued or running rows, in first-seen order
pub fn active_batch_ids(rows: &[PromptRow]) -> Vec<String> {
    let mut seen = HashSet::new();
    rows.iter()
        .filter(|row| row.status.is_active())
        .filter_map(|row| row.batch_id.as_ref())
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}

/// The row after applying a remote status, `None` when nothing changes
fn apply_status(
    row: &PromptRow,
    batch: &BatchObject,
    results: &HashMap<String, String>,
) -> Option<PromptRow> {
    let mut next = row.clone();
    next.status = batch.batch_status().row_status();

    match next.status {
        RowStatus::Completed => {
            if let Some(text) = results.get(&row.id) {
                if next.result.as_deref() != Some(text.as_str()) {
                    next.result = Some(text.clone());
                }
            }
            next.error = None;
        }
        RowStatus::Failed => {
            if next.error.is_none() {
                next.error = Some(format!("Batch status: {}", batch.status));
            }
            next.result = None;
        }
        RowStatus::NotSubmitted | RowStatus::Queued | RowStatus::Running => {
            next.result = None;
            next.error = None;
        }
    }

    (next != *row).then_some(next)
}
