//! Health check endpoints

use crate::server::state::AppState;
use crate::server::types::{ComponentHealth, DetailedHealthStatus, HealthStatus};
use actix_web::{HttpResponse, web};
use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::{debug, error};

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/health")
            .route("", web::get().to(health_check))
            .route("/detailed", web::get().to(detailed_health_check)),
    );
}

fn health_status(status: &'static str) -> HealthStatus {
    let build = crate::build_info();
    HealthStatus {
        status: Cow::Borrowed(status),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(build.version),
        git_hash: Cow::Borrowed(build.git_hash),
        build_time: Cow::Borrowed(build.build_time),
    }
}

/// Basic health check endpoint
///
/// Returns a simple health status indicating if the service is running.
pub async fn health_check() -> HttpResponse {
    debug!("Health check requested");
    HttpResponse::Ok().json(health_status("healthy"))
}

/// Health check including a read of the row storage
async fn detailed_health_check(state: web::Data<AppState>) -> HttpResponse {
    debug!("Detailed health check requested");

    let (status, storage, rows) = match state.service.status_counts().await {
        Ok(counts) => (
            "healthy",
            ComponentHealth {
                status: Cow::Borrowed("healthy"),
                message: None,
            },
            counts
                .into_iter()
                .map(|(status, count)| (status.to_string(), count))
                .collect(),
        ),
        Err(e) => {
            error!(error = %e, "Row storage health check failed");
            (
                "degraded",
                ComponentHealth {
                    status: Cow::Borrowed("unhealthy"),
                    message: Some(e.to_string()),
                },
                BTreeMap::new(),
            )
        }
    };

    let detailed = DetailedHealthStatus {
        health: health_status(status),
        storage,
        rows,
    };

    if status == "healthy" {
        HttpResponse::Ok().json(detailed)
    } else {
        HttpResponse::ServiceUnavailable().json(detailed)
    }
}
