//! Prompt batch processing
//!
//! This module submits prompt rows to a remote batch-inference API and keeps
//! the stored rows in step with the remote batch lifecycle.

pub mod client;
pub mod jsonl;
pub mod service;
pub mod submitter;
pub mod synchronizer;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all public types
pub use client::{BatchApi, OpenAIBatchClient};
pub use jsonl::{encode_batch_file, extract_result, parse_results};
pub use service::BatchService;
pub use submitter::BatchSubmitter;
pub use synchronizer::{BatchSynchronizer, active_batch_ids};
pub use types::{
    BatchObject, BatchRequestCounts, BatchResult, BatchStatus, CreateBatchRequest, FileObject,
    PromptRef, PromptRow, RowStatus, SubmittedBatch, SyncOutcome, SyncReport,
};
