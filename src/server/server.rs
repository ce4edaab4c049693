//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and its core methods.

use crate::config::{Config, CorsConfig, ServerConfig};
use crate::core::batch::BatchService;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_cors::Cors;
use actix_files::Files;
use actix_web::{
    App, HttpResponse, HttpServer as ActixHttpServer, middleware::DefaultHeaders, web,
};
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the configured batch service
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let service = BatchService::from_config(config).await?;
        let state = AppState::new(config.clone(), service);

        Ok(Self {
            config: config.gateway.server.clone(),
            state,
        })
    }

    /// Create a server around an already wired state
    pub fn with_state(state: AppState) -> Self {
        Self {
            config: state.config.gateway.server.clone(),
            state,
        }
    }

    /// Create the Actix-web application
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let server_config = state.config.gateway.server.clone();
        let cors = build_cors(&server_config.cors);

        let json_config = web::JsonConfig::default()
            .limit(server_config.max_body_size)
            .error_handler(|err, _req| GatewayError::from(err).into());
        let query_config =
            web::QueryConfig::default().error_handler(|err, _req| GatewayError::from(err).into());

        App::new()
            .app_data(state)
            .app_data(json_config)
            .app_data(query_config)
            .app_data(web::PayloadConfig::new(server_config.max_body_size))
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(DefaultHeaders::new().add(("Server", "batch-gateway")))
            .configure(routes::configure_routes)
            .configure(|cfg| {
                if let Some(dir) = &server_config.static_dir {
                    cfg.service(Files::new("/", dir).index_file("index.html"));
                }
            })
            .default_service(web::route().to(not_found))
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let workers = self.config.worker_count();

        info!("Starting HTTP server on {} with {} workers", bind_addr, workers);

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .workers(workers)
            .bind(&bind_addr)
            .map_err(|e| GatewayError::config(format!("Failed to bind {}: {}", bind_addr, e)))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| GatewayError::internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

fn build_cors(cors_config: &CorsConfig) -> Cors {
    if !cors_config.enabled {
        return Cors::default();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_any_header()
        .max_age(cors_config.max_age);

    if cors_config.allows_all_origins() {
        cors = cors.allow_any_origin();
        if let Err(e) = cors_config.validate() {
            warn!(error = %e, "CORS configuration warning");
        }
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

async fn not_found() -> actix_web::Result<HttpResponse> {
    Err(GatewayError::not_found("No route matches the request").into())
}
