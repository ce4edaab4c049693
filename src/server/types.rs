//! Request and response records of the HTTP API

use crate::core::batch::types::{PromptRef, PromptRow, SyncReport, validate_prompts};
use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Body of `POST /api/prompts/add`
#[derive(Debug, Clone, Deserialize)]
pub struct AddPromptsRequest {
    pub prompts: Vec<PromptRef>,
}

impl AddPromptsRequest {
    pub fn validate(&self) -> Result<()> {
        validate_prompts(&self.prompts)
    }
}

/// Body of `POST /api/batch/run`
#[derive(Debug, Clone, Deserialize)]
pub struct RunBatchRequest {
    pub prompts: Vec<PromptRef>,
    #[serde(default)]
    pub model: Option<String>,
}

impl RunBatchRequest {
    pub fn validate(&self) -> Result<()> {
        if self.prompts.is_empty() {
            return Err(GatewayError::validation("prompts must not be empty"));
        }
        validate_prompts(&self.prompts)
    }
}

/// Body of `POST /api/batch/run-pending`, may be omitted entirely
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunPendingRequest {
    #[serde(default)]
    pub model: Option<String>,
}

/// Body of `POST /api/batches/remove`
#[derive(Debug, Clone, Deserialize)]
pub struct RemoveRowsRequest {
    pub ids: Vec<String>,
}

/// Query of `GET /api/batch/status`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStatusQuery {
    #[serde(default)]
    pub batch_id: Option<String>,
}

/// Query of `GET /api/batch/result`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResultQuery {
    #[serde(default)]
    pub file_id: Option<String>,
}

/// Row listing, with cycle counters after a sync
#[derive(Debug, Clone, Serialize)]
pub struct RowsResponse {
    pub rows: Vec<PromptRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<SyncReport>,
}

/// Liveness payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: Cow<'static, str>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: Cow<'static, str>,
    pub git_hash: Cow<'static, str>,
    pub build_time: Cow<'static, str>,
}

/// Liveness payload with row counts
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedHealthStatus {
    #[serde(flatten)]
    pub health: HealthStatus,
    pub storage: ComponentHealth,
    #[serde(skip_serializing_if = "std::collections::BTreeMap::is_empty")]
    pub rows: std::collections::BTreeMap<String, usize>,
}

/// Component health status
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub status: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
