//! Batch inference API configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Connection and submission settings for the OpenAI-compatible batch API
#[derive(Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Bearer credential
    #[serde(default)]
    pub api_key: String,
    /// API base URL, e.g. `https://api.openai.com/v1`
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Transport timeout in seconds
    #[serde(default = "default_upstream_timeout")]
    pub timeout: u64,
    /// Model used when a submission does not name one
    #[serde(default = "default_model")]
    pub default_model: String,
    /// Endpoint every job line targets
    #[serde(default = "default_batch_endpoint")]
    pub endpoint: String,
    /// Completion window passed to batch creation
    #[serde(default = "default_completion_window")]
    pub completion_window: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: default_api_base(),
            timeout: default_upstream_timeout(),
            default_model: default_model(),
            endpoint: default_batch_endpoint(),
            completion_window: default_completion_window(),
        }
    }
}

// Keeps the credential out of logs
impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("api_key", &if self.api_key.is_empty() { "" } else { "[REDACTED]" })
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .field("default_model", &self.default_model)
            .field("endpoint", &self.endpoint)
            .field("completion_window", &self.completion_window)
            .finish()
    }
}

impl UpstreamConfig {
    /// Merge upstream configurations
    pub fn merge(mut self, other: Self) -> Self {
        if !other.api_key.is_empty() {
            self.api_key = other.api_key;
        }
        if other.api_base != default_api_base() {
            self.api_base = other.api_base;
        }
        if other.timeout != default_upstream_timeout() {
            self.timeout = other.timeout;
        }
        if other.default_model != default_model() {
            self.default_model = other.default_model;
        }
        if other.endpoint != default_batch_endpoint() {
            self.endpoint = other.endpoint;
        }
        if other.completion_window != default_completion_window() {
            self.completion_window = other.completion_window;
        }
        self
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }

    /// Validate upstream configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("API key is required (set upstream.api_key or OPENAI_API_KEY)".to_string());
        }

        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err(format!("Invalid API base URL: {}", self.api_base));
        }

        if self.timeout == 0 {
            return Err("Upstream timeout cannot be 0".to_string());
        }

        if self.default_model.trim().is_empty() {
            return Err("Default model cannot be empty".to_string());
        }

        if !self.endpoint.starts_with('/') {
            return Err(format!("Batch endpoint must be a path: {}", self.endpoint));
        }

        if self.completion_window.trim().is_empty() {
            return Err("Completion window cannot be empty".to_string());
        }

        Ok(())
    }
}
