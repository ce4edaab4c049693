//! Configuration data models
//!
//! This module defines all configuration structures used throughout the gateway.

#![allow(missing_docs)]

pub mod gateway;
pub mod logging;
pub mod server;
pub mod storage;
pub mod upstream;

// Re-export all configuration types
pub use gateway::*;
pub use logging::*;
pub use server::*;
pub use storage::*;
pub use upstream::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8787
}

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    10 * 1024 * 1024 // 10MB
}

pub fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

pub fn default_upstream_timeout() -> u64 {
    60
}

pub fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

pub fn default_batch_endpoint() -> String {
    "/v1/responses".to_string()
}

pub fn default_completion_window() -> String {
    "24h".to_string()
}

pub fn default_storage_path() -> String {
    "data".to_string()
}

pub fn default_storage_key() -> String {
    "rows".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}
