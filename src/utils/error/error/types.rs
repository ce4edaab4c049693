//! Error types for the batch gateway

use thiserror::Error;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Row storage errors (backend unreachable, corrupt blob)
    #[error("Storage error: {0}")]
    Storage(String),

    /// HTTP client errors (transport level, no upstream status)
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Caller errors: rejected before any side effect
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Non-success response from the batch inference API
    #[error("Upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    /// Parsing errors
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
