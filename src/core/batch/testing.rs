//! In-process fakes for unit tests

use super::client::BatchApi;
use super::types::{BatchObject, BatchStatus, CreateBatchRequest, FileObject};
use crate::storage::RowStorage;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct FakeState {
    uploads: Vec<(String, String)>,
    created: Vec<CreateBatchRequest>,
    retrieved: Vec<String>,
    batches: HashMap<String, BatchObject>,
    files: HashMap<String, String>,
}

/// Scriptable `BatchApi`
#[derive(Default)]
pub struct FakeBatchApi {
    state: Mutex<FakeState>,
    create_failure: Option<u16>,
    retrieve_failures: HashMap<String, u16>,
}

impl FakeBatchApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_create(mut self, status: u16) -> Self {
        self.create_failure = Some(status);
        self
    }

    pub fn fail_retrieve(mut self, batch_id: &str, status: u16) -> Self {
        self.retrieve_failures.insert(batch_id.to_string(), status);
        self
    }

    /// Script the remote state of a batch
    pub fn set_batch(&self, batch_id: &str, status: BatchStatus, output_file_id: Option<&str>) {
        let batch = batch_object(batch_id, status, output_file_id);
        self.state
            .lock()
            .unwrap()
            .batches
            .insert(batch_id.to_string(), batch);
    }

    pub fn set_file(&self, file_id: &str, content: &str) {
        self.state
            .lock()
            .unwrap()
            .files
            .insert(file_id.to_string(), content.to_string());
    }

    pub fn uploads(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().uploads.clone()
    }

    pub fn created(&self) -> Vec<CreateBatchRequest> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn retrieved(&self) -> Vec<String> {
        self.state.lock().unwrap().retrieved.clone()
    }
}

pub fn batch_object(batch_id: &str, status: BatchStatus, output_file_id: Option<&str>) -> BatchObject {
    BatchObject {
        id: batch_id.to_string(),
        status: status.as_str().to_string(),
        endpoint: None,
        input_file_id: None,
        output_file_id: output_file_id.map(str::to_string),
        error_file_id: None,
        request_counts: None,
        extra: serde_json::Map::new(),
    }
}

#[async_trait]
impl BatchApi for FakeBatchApi {
    async fn upload_file(&self, filename: &str, content: Vec<u8>) -> Result<FileObject> {
        let mut state = self.state.lock().unwrap();
        state
            .uploads
            .push((filename.to_string(), String::from_utf8(content).unwrap()));
        Ok(FileObject {
            id: format!("file-{}", state.uploads.len()),
            filename: Some(filename.to_string()),
            bytes: None,
            purpose: Some("batch".to_string()),
        })
    }

    async fn create_batch(&self, request: &CreateBatchRequest) -> Result<BatchObject> {
        if let Some(status) = self.create_failure {
            return Err(GatewayError::upstream(status, "batch create failed"));
        }
        let mut state = self.state.lock().unwrap();
        state.created.push(request.clone());
        let id = format!("batch_{}", state.created.len());
        let batch = batch_object(&id, BatchStatus::Validating, None);
        state.batches.insert(id, batch.clone());
        Ok(batch)
    }

    async fn retrieve_batch(&self, batch_id: &str) -> Result<BatchObject> {
        let mut state = self.state.lock().unwrap();
        state.retrieved.push(batch_id.to_string());
        if let Some(status) = self.retrieve_failures.get(batch_id) {
            return Err(GatewayError::upstream(*status, "batch status failed"));
        }
        state
            .batches
            .get(batch_id)
            .cloned()
            .ok_or_else(|| GatewayError::upstream(404, format!("no batch {}", batch_id)))
    }

    async fn file_content(&self, file_id: &str) -> Result<String> {
        self.state
            .lock()
            .unwrap()
            .files
            .get(file_id)
            .cloned()
            .ok_or_else(|| GatewayError::upstream(404, format!("no file {}", file_id)))
    }
}

/// Storage whose every call fails
pub struct FailingStorage;

#[async_trait]
impl RowStorage for FailingStorage {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Err(GatewayError::storage("storage unavailable"))
    }

    async fn put(&self, _key: &str, _value: Vec<u8>) -> Result<()> {
        Err(GatewayError::storage("storage unavailable"))
    }
}
