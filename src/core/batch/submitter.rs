//! Batch submission
//!
//! Encodes prompts into a JSONL input file, uploads it, creates the remote
//! batch and registers the rows as queued.

use super::client::BatchApi;
use super::jsonl::encode_batch_file;
use super::types::{CreateBatchRequest, PromptRef, SubmittedBatch};
use crate::config::UpstreamConfig;
use crate::storage::RowStore;
use crate::utils::error::{GatewayError, Result};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, info};

/// Name of the uploaded input file
pub const BATCH_FILE_NAME: &str = "batch.jsonl";

/// Submits prompt lists as remote batch jobs
pub struct BatchSubmitter {
    api: Arc<dyn BatchApi>,
    store: Arc<RowStore>,
    default_model: String,
    endpoint: String,
    completion_window: String,
}

impl BatchSubmitter {
    pub fn new(api: Arc<dyn BatchApi>, store: Arc<RowStore>, upstream: &UpstreamConfig) -> Self {
        Self {
            api,
            store,
            default_model: upstream.default_model.clone(),
            endpoint: upstream.endpoint.clone(),
            completion_window: upstream.completion_window.clone(),
        }
    }

    /// Submit `prompts` as one batch, using `model` or the configured default
    ///
    /// Upload and create failures are returned without touching the store.
    /// Once the batch exists remotely its id is returned even if recording
    /// the rows fails.
    pub async fn submit(
        &self,
        prompts: Vec<PromptRef>,
        model: Option<&str>,
    ) -> Result<SubmittedBatch> {
        let prompts = dedup_by_id(prompts);
        if prompts.is_empty() {
            return Err(GatewayError::validation("no prompts to submit"));
        }

        let model = model
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(&self.default_model);
        let payload = encode_batch_file(&prompts, model, &self.endpoint)?;

        let file = self
            .api
            .upload_file(BATCH_FILE_NAME, payload.into_bytes())
            .await?;

        let batch = self
            .api
            .create_batch(&CreateBatchRequest {
                input_file_id: file.id.clone(),
                endpoint: self.endpoint.clone(),
                completion_window: self.completion_window.clone(),
            })
            .await?;

        info!(
            batch_id = %batch.id,
            input_file_id = %file.id,
            rows = prompts.len(),
            model,
            "Batch submitted"
        );

        if let Err(e) = self.store.register_batch(&batch.id, prompts).await {
            error!(batch_id = %batch.id, error = %e, "Failed to register submitted rows");
        }

        Ok(SubmittedBatch {
            batch_id: batch.id,
            input_file_id: file.id,
        })
    }
}

/// Keep the first occurrence of each id, preserving order
fn dedup_by_id(prompts: Vec<PromptRef>) -> Vec<PromptRef> {
    let mut seen = HashSet::new();
    prompts
        .into_iter()
        .filter(|prompt| seen.insert(prompt.id.clone()))
        .collect()
}
