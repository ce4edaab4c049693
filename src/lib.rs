//! # batch-gateway
//!
//! Register free-text prompts, submit them to the OpenAI Batch API and keep a
//! persisted prompt row set in step with the remote batch lifecycle.
//!
//! ## Features
//!
//! - **Row store**: one ordered, id-unique collection persisted as a single blob
//! - **Batch submission**: JSONL input file upload and batch creation
//! - **Status synchronization**: remote state mapping and result merging with
//!   one store write per cycle
//! - **HTTP API**: actix-web endpoints for the prompt UI
//!
//! ## Library use
//!
//! ```rust,no_run
//! use batch_gateway::{BatchService, Config, PromptRef};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config/gateway.yaml").await?;
//!     let service = BatchService::from_config(&config).await?;
//!
//!     service.add_prompts(vec![PromptRef::new("r1", "Say hello")]).await?;
//!     let submitted = service.submit_pending(None).await?;
//!     println!("Submitted batch {}", submitted.batch_id);
//!
//!     let outcome = service.run_sync_cycle().await?;
//!     println!("{} rows", outcome.rows.len());
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::batch::{
    BatchApi, BatchService, OpenAIBatchClient, PromptRef, PromptRow, RowStatus, SubmittedBatch,
    SyncOutcome, SyncReport,
};
pub use storage::{RowStorage, RowStore};
pub use utils::error::{GatewayError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Gateway build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp (unix seconds)
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
}

/// Build information captured at compile time
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: VERSION,
        build_time: env!("BUILD_TIME"),
        git_hash: env!("GIT_HASH"),
    }
}
