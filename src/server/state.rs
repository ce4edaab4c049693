//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::batch::BatchService;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc so cloning per worker is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Batch lifecycle operations
    pub service: Arc<BatchService>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, service: BatchService) -> Self {
        Self {
            config: Arc::new(config),
            service: Arc::new(service),
        }
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
