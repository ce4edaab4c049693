//! Batch processing types and data structures

use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a stored prompt row
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    /// Registered but never part of a batch
    NotSubmitted,
    /// Part of a batch the remote side has not started yet
    Queued,
    /// Remote batch is being processed
    Running,
    /// Remote batch finished, result may be attached
    Completed,
    /// Remote batch failed, expired or was cancelled
    Failed,
}

impl RowStatus {
    /// Rows in this state are never re-queried by a sync cycle
    pub fn is_terminal(self) -> bool {
        matches!(self, RowStatus::Completed | RowStatus::Failed)
    }

    /// Rows in this state have an outstanding remote batch
    pub fn is_active(self) -> bool {
        matches!(self, RowStatus::Queued | RowStatus::Running)
    }

    /// Rows in this state may be (re)submitted
    pub fn is_pending(self) -> bool {
        matches!(self, RowStatus::NotSubmitted | RowStatus::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RowStatus::NotSubmitted => "not_submitted",
            RowStatus::Queued => "queued",
            RowStatus::Running => "running",
            RowStatus::Completed => "completed",
            RowStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for RowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One prompt and its lifecycle state, as persisted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PromptRow {
    /// Caller-assigned identifier, also the batch correlation id
    pub id: String,
    /// Input text
    pub prompt: String,
    /// Lifecycle state
    pub status: RowStatus,
    /// Remote batch this row was submitted under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
    /// Model output, only when completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Failure reason, only when failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PromptRow {
    /// A freshly registered, never submitted row
    pub fn new(id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            status: RowStatus::NotSubmitted,
            batch_id: None,
            result: None,
            error: None,
        }
    }

    /// A row just submitted under `batch_id`
    pub fn queued(
        id: impl Into<String>,
        prompt: impl Into<String>,
        batch_id: impl Into<String>,
    ) -> Self {
        Self {
            status: RowStatus::Queued,
            batch_id: Some(batch_id.into()),
            ..Self::new(id, prompt)
        }
    }
}

impl From<PromptRef> for PromptRow {
    fn from(prompt: PromptRef) -> Self {
        PromptRow::new(prompt.id, prompt.prompt)
    }
}

/// Caller-facing prompt reference
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptRef {
    pub id: String,
    pub prompt: String,
}

impl PromptRef {
    pub fn new(id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
        }
    }

    /// Reject blank identifiers or prompts
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(GatewayError::validation("prompt id must not be empty"));
        }
        if self.prompt.trim().is_empty() {
            return Err(GatewayError::validation(format!(
                "prompt text must not be empty (id: {})",
                self.id
            )));
        }
        Ok(())
    }
}

impl From<&PromptRow> for PromptRef {
    fn from(row: &PromptRow) -> Self {
        PromptRef::new(row.id.clone(), row.prompt.clone())
    }
}

/// Validate every reference in a caller-supplied list
pub fn validate_prompts(prompts: &[PromptRef]) -> Result<()> {
    prompts.iter().try_for_each(PromptRef::validate)
}

/// Remote batch processing status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    /// Batch is being validated
    Validating,
    /// Batch validation failed
    Failed,
    /// Batch is being processed
    InProgress,
    /// Batch is being finalized
    Finalizing,
    /// Batch processing completed
    Completed,
    /// Batch has expired
    Expired,
    /// Batch is being cancelled
    Cancelling,
    /// Batch has been cancelled
    Cancelled,
    /// Any status this client does not know yet
    #[serde(other)]
    Unknown,
}

impl BatchStatus {
    /// The local row state a remote batch status maps to
    pub fn row_status(self) -> RowStatus {
        match self {
            BatchStatus::Completed => RowStatus::Completed,
            BatchStatus::Failed | BatchStatus::Expired | BatchStatus::Cancelled => {
                RowStatus::Failed
            }
            BatchStatus::Validating
            | BatchStatus::InProgress
            | BatchStatus::Finalizing
            | BatchStatus::Cancelling
            | BatchStatus::Unknown => RowStatus::Running,
        }
    }

    /// Parse a wire status, mapping anything unrecognized to `Unknown`
    pub fn parse(status: &str) -> Self {
        match status {
            "validating" => BatchStatus::Validating,
            "failed" => BatchStatus::Failed,
            "in_progress" => BatchStatus::InProgress,
            "finalizing" => BatchStatus::Finalizing,
            "completed" => BatchStatus::Completed,
            "expired" => BatchStatus::Expired,
            "cancelling" => BatchStatus::Cancelling,
            "cancelled" => BatchStatus::Cancelled,
            _ => BatchStatus::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BatchStatus::Validating => "validating",
            BatchStatus::Failed => "failed",
            BatchStatus::InProgress => "in_progress",
            BatchStatus::Finalizing => "finalizing",
            BatchStatus::Completed => "completed",
            BatchStatus::Expired => "expired",
            BatchStatus::Cancelling => "cancelling",
            BatchStatus::Cancelled => "cancelled",
            BatchStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the submission file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchItem {
    /// Correlation id, equal to the row id
    pub custom_id: String,
    /// HTTP method (always POST)
    pub method: String,
    /// API endpoint the line targets
    pub url: String,
    /// Request body
    pub body: BatchItemBody,
}

/// Request body of a submission line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchItemBody {
    pub model: String,
    pub input: String,
}

/// One line of the output file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    /// Custom ID from the request
    #[serde(default)]
    pub custom_id: Option<String>,
    /// Response envelope, `{status_code, request_id, body}`
    #[serde(default)]
    pub response: Option<serde_json::Value>,
    /// Per-request error information
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

/// Body of `POST /batches`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBatchRequest {
    pub input_file_id: String,
    pub endpoint: String,
    pub completion_window: String,
}

/// Request counts for batch
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BatchRequestCounts {
    /// Total requests in batch
    #[serde(default)]
    pub total: i64,
    /// Completed requests
    #[serde(default)]
    pub completed: i64,
    /// Failed requests
    #[serde(default)]
    pub failed: i64,
}

/// Remote batch object as returned by create/retrieve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchObject {
    /// Batch ID
    pub id: String,
    /// Batch status exactly as reported, so unknown values pass through
    pub status: String,
    /// Endpoint used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Input file ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_file_id: Option<String>,
    /// Output file ID, set once results exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file_id: Option<String>,
    /// Error file ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_file_id: Option<String>,
    /// Request counts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_counts: Option<BatchRequestCounts>,
    /// Remaining fields, passed through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BatchObject {
    /// The reported status as a known variant
    pub fn batch_status(&self) -> BatchStatus {
        BatchStatus::parse(&self.status)
    }
}

/// Uploaded file as returned by `POST /files`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileObject {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

/// Outcome of a successful submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedBatch {
    pub batch_id: String,
    pub input_file_id: String,
}

/// Counters of one sync cycle
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct SyncReport {
    /// Active batches whose status was fetched
    pub checked: usize,
    /// Active batches skipped because the status query failed
    pub skipped: usize,
    /// Rows written back
    pub updated: usize,
}

/// Rows as seen right after a sync cycle
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub rows: Vec<PromptRow>,
    pub report: SyncReport,
}
