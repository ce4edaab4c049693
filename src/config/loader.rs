//! Configuration loading utilities
//!
//! Environment overrides applied on top of the file configuration.

use super::models::*;
use crate::utils::error::{GatewayError, Result};
use std::env;
use tracing::debug;

/// Credential for the batch API
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
/// Batch API base URL
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
/// Default model for submissions
pub const ENV_MODEL: &str = "BATCH_MODEL";
/// Listen host
pub const ENV_HOST: &str = "GATEWAY_HOST";
/// Listen port
pub const ENV_PORT: &str = "GATEWAY_PORT";
/// Base directory of the file storage backend
pub const ENV_STORAGE_PATH: &str = "BATCH_STORAGE_PATH";

impl GatewayConfig {
    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        debug!("Applying configuration overrides from environment");

        if let Some(api_key) = lookup(ENV_API_KEY) {
            self.upstream.api_key = api_key;
        }
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.upstream.api_base = base_url;
        }
        if let Some(model) = lookup(ENV_MODEL) {
            self.upstream.default_model = model;
        }
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port
                .parse()
                .map_err(|e| GatewayError::Config(format!("Invalid {}: {}", ENV_PORT, e)))?;
        }
        if let Some(path) = lookup(ENV_STORAGE_PATH) {
            self.storage.path = path;
        }

        Ok(())
    }
}
