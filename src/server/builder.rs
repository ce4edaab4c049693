//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for easier server configuration
//! and the run_server function used by the binary.

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config).await
    }
}

/// Build and run the server until it stops
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting batch gateway v{}", env!("CARGO_PKG_VERSION"));

    let server = ServerBuilder::new().with_config(config).build().await?;
    let server_config = server.config();
    info!(
        "Server starting at: http://{}:{}",
        server_config.host, server_config.port
    );
    if let Some(dir) = &server_config.static_dir {
        info!("Serving static assets from {}", dir);
    }
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   POST /api/prompts/add - Register prompts");
    info!("   POST /api/batch/run - Submit a batch");
    info!("   POST /api/batch/run-pending - Submit all pending prompts");
    info!("   POST /api/batch/sync - Synchronize batch status");
    info!("   GET  /api/batch/list - List prompt rows");
    info!("   GET  /api/batch/status - Remote batch status");
    info!("   GET  /api/batch/result - Raw batch output");
    info!("   POST /api/batches/remove - Remove prompt rows");

    server.start().await
}
