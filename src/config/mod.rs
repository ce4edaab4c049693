//! Configuration management for the gateway
//!
//! This module handles loading, validation, and management of all gateway configuration.

pub mod loader;
pub mod models;

pub use models::*;

use crate::utils::error::{GatewayError, Result};
use std::path::Path;
use tracing::{debug, info, warn};

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "config/gateway.yaml";

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Gateway configuration
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        let gateway: GatewayConfig = serde_yaml::from_str(&content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))?;

        debug!("Configuration loaded successfully");
        Ok(Self { gateway })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut gateway = GatewayConfig::default();
        gateway.apply_env()?;
        let config = Self { gateway };

        config.validate()?;
        Ok(config)
    }

    /// Load the file if it exists, then apply environment overrides and validate
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::from_file(path).await?
        } else {
            warn!(
                "Configuration file {:?} not found, using defaults and environment",
                path
            );
            Self::default()
        };

        config.gateway.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }

    /// Get batch API configuration
    pub fn upstream(&self) -> &UpstreamConfig {
        &self.gateway.upstream
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.gateway.storage
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.gateway.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.gateway
            .server
            .validate()
            .map_err(|e| GatewayError::Config(format!("Server config error: {}", e)))?;

        self.gateway
            .upstream
            .validate()
            .map_err(|e| GatewayError::Config(format!("Upstream config error: {}", e)))?;

        self.gateway
            .storage
            .validate()
            .map_err(|e| GatewayError::Config(format!("Storage config error: {}", e)))?;

        self.gateway
            .logging
            .validate()
            .map_err(|e| GatewayError::Config(format!("Logging config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.gateway = self.gateway.merge(other.gateway);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.gateway)
            .map_err(|e| GatewayError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
