//! Batch service facade
//!
//! The entry point the HTTP layer talks to: prompt registration, submission,
//! synchronization and passthrough queries against the remote batch API.

use super::client::{BatchApi, OpenAIBatchClient};
use super::submitter::BatchSubmitter;
use super::synchronizer::BatchSynchronizer;
use super::types::{
    BatchObject, PromptRef, PromptRow, RowStatus, SubmittedBatch, SyncOutcome, validate_prompts,
};
use crate::config::Config;
use crate::storage::{RowStore, open_row_store};
use crate::utils::error::{GatewayError, Result};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

/// Prompt batch lifecycle operations
pub struct BatchService {
    api: Arc<dyn BatchApi>,
    store: Arc<RowStore>,
    submitter: BatchSubmitter,
    synchronizer: BatchSynchronizer,
}

impl BatchService {
    /// Wire a service from its collaborators
    pub fn new(api: Arc<dyn BatchApi>, store: Arc<RowStore>, config: &Config) -> Self {
        let submitter = BatchSubmitter::new(api.clone(), store.clone(), config.upstream());
        let synchronizer = BatchSynchronizer::new(api.clone(), store.clone());
        Self {
            api,
            store,
            submitter,
            synchronizer,
        }
    }

    /// Build the service with the OpenAI client and the configured storage
    pub async fn from_config(config: &Config) -> Result<Self> {
        let api: Arc<dyn BatchApi> = Arc::new(OpenAIBatchClient::new(config.upstream())?);
        let store = Arc::new(open_row_store(config.storage()).await?);
        info!(
            backend = ?config.storage().backend,
            key = store.key(),
            "Batch service initialized"
        );
        Ok(Self::new(api, store, config))
    }

    /// Register prompts as `not_submitted`; known ids are ignored
    pub async fn add_prompts(&self, prompts: Vec<PromptRef>) -> Result<usize> {
        validate_prompts(&prompts)?;
        self.store.add_prompts(prompts).await
    }

    /// Submit the given prompts as one batch
    pub async fn submit_batch(
        &self,
        prompts: Vec<PromptRef>,
        model: Option<String>,
    ) -> Result<SubmittedBatch> {
        validate_prompts(&prompts)?;
        self.submitter.submit(prompts, model.as_deref()).await
    }

    /// Submit every stored row that was never submitted or has failed
    pub async fn submit_pending(&self, model: Option<String>) -> Result<SubmittedBatch> {
        let pending: Vec<PromptRef> = self
            .store
            .pending_rows()
            .await?
            .iter()
            .map(PromptRef::from)
            .collect();

        if pending.is_empty() {
            return Err(GatewayError::validation("no pending prompts to submit"));
        }

        debug!(rows = pending.len(), "Submitting pending rows");
        self.submitter.submit(pending, model.as_deref()).await
    }

    /// Reconcile stored rows with the remote batches
    pub async fn run_sync_cycle(&self) -> Result<SyncOutcome> {
        self.synchronizer.run_cycle().await
    }

    /// Delete rows by id, returning how many existed
    pub async fn remove_rows(&self, ids: Vec<String>) -> Result<usize> {
        let ids: HashSet<String> = ids.into_iter().collect();
        if ids.is_empty() {
            return Ok(0);
        }
        self.store.remove_rows(&ids).await
    }

    pub async fn list_rows(&self) -> Result<Vec<PromptRow>> {
        self.store.list_rows().await
    }

    /// Row counts per status
    pub async fn status_counts(&self) -> Result<HashMap<RowStatus, usize>> {
        self.store.status_counts().await
    }

    /// Current remote state of a batch
    pub async fn batch_status(&self, batch_id: &str) -> Result<BatchObject> {
        let batch_id = batch_id.trim();
        if batch_id.is_empty() {
            return Err(GatewayError::validation("batchId is required"));
        }
        self.api.retrieve_batch(batch_id).await
    }

    /// Raw JSONL content of a batch output file
    pub async fn batch_result(&self, file_id: &str) -> Result<String> {
        let file_id = file_id.trim();
        if file_id.is_empty() {
            return Err(GatewayError::validation("fileId is required"));
        }
        self.api.file_content(file_id).await
    }
}
