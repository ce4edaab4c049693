//! Batch inference API client
//!
//! `BatchApi` is the seam the submitter and synchronizer talk to;
//! `OpenAIBatchClient` implements it over the OpenAI files and batches endpoints.

use super::types::{BatchObject, CreateBatchRequest, FileObject};
use crate::config::UpstreamConfig;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, multipart};
use std::time::Duration;
use tracing::debug;

/// Remote batch-inference operations
#[async_trait]
pub trait BatchApi: Send + Sync {
    /// Upload a batch input file, returning its file object
    async fn upload_file(&self, filename: &str, content: Vec<u8>) -> Result<FileObject>;

    /// Create a batch job over an uploaded file
    async fn create_batch(&self, request: &CreateBatchRequest) -> Result<BatchObject>;

    /// Fetch the current state of a batch job
    async fn retrieve_batch(&self, batch_id: &str) -> Result<BatchObject>;

    /// Download a file's content as text
    async fn file_content(&self, file_id: &str) -> Result<String>;
}

/// OpenAI Batch API client
#[derive(Debug, Clone)]
pub struct OpenAIBatchClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIBatchClient {
    /// Create a client from upstream configuration
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(|e| GatewayError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url().to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-success response into an upstream error carrying its body
    async fn check(response: Response, action: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::upstream(
            status.as_u16(),
            format!("{} failed: {}", action, body),
        ))
    }
}

#[async_trait]
impl BatchApi for OpenAIBatchClient {
    async fn upload_file(&self, filename: &str, content: Vec<u8>) -> Result<FileObject> {
        debug!(filename, bytes = content.len(), "Uploading batch input file");

        let file_part = multipart::Part::bytes(content)
            .file_name(filename.to_string())
            .mime_str("application/jsonl")
            .map_err(|e| GatewayError::internal(format!("Invalid MIME type: {}", e)))?;
        let form = multipart::Form::new()
            .text("purpose", "batch")
            .part("file", file_part);

        let response = self
            .http
            .post(self.url("/files"))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let response = Self::check(response, "upload").await?;
        Ok(response.json().await?)
    }

    async fn create_batch(&self, request: &CreateBatchRequest) -> Result<BatchObject> {
        debug!(input_file_id = %request.input_file_id, "Creating batch");

        let response = self
            .http
            .post(self.url("/batches"))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let response = Self::check(response, "batch create").await?;
        Ok(response.json().await?)
    }

    async fn retrieve_batch(&self, batch_id: &str) -> Result<BatchObject> {
        let response = self
            .http
            .get(self.url(&format!("/batches/{}", batch_id)))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let response = Self::check(response, "batch status").await?;
        Ok(response.json().await?)
    }

    async fn file_content(&self, file_id: &str) -> Result<String> {
        let response = self
            .http
            .get(self.url(&format!("/files/{}/content", file_id)))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let response = Self::check(response, "batch result").await?;
        Ok(response.text().await?)
    }
}
