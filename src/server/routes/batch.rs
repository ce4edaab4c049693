//! Batch endpoints
//!
//! Submission, synchronization, listing, removal and passthrough queries
//! against the remote batch API.

use crate::server::state::AppState;
use crate::server::types::{
    BatchResultQuery, BatchStatusQuery, RemoveRowsRequest, RowsResponse, RunBatchRequest,
    RunPendingRequest,
};
use crate::utils::error::{GatewayError, Result};
use actix_web::{HttpResponse, web};
use tracing::debug;

/// Configure batch routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/batch")
            .route("/run", web::post().to(run_batch))
            .route("/run-pending", web::post().to(run_pending))
            .route("/sync", web::post().to(sync_batches))
            .route("/list", web::get().to(list_rows))
            .route("/status", web::get().to(batch_status))
            .route("/result", web::get().to(batch_result)),
    )
    .route("/api/batches/remove", web::post().to(remove_rows));
}

/// Submit the given prompts as a new batch
async fn run_batch(
    state: web::Data<AppState>,
    request: web::Json<RunBatchRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;

    let submitted = state
        .service
        .submit_batch(request.prompts, request.model)
        .await?;
    Ok(HttpResponse::Ok().json(submitted))
}

/// Submit every stored row that is not submitted yet or failed
async fn run_pending(state: web::Data<AppState>, body: web::Bytes) -> Result<HttpResponse> {
    let request: RunPendingRequest = if body.iter().all(u8::is_ascii_whitespace) {
        RunPendingRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| GatewayError::validation(format!("Invalid JSON body: {}", e)))?
    };

    let submitted = state.service.submit_pending(request.model).await?;
    Ok(HttpResponse::Ok().json(submitted))
}

/// Run one synchronization cycle and return the resulting rows
async fn sync_batches(state: web::Data<AppState>) -> Result<HttpResponse> {
    let outcome = state.service.run_sync_cycle().await?;
    Ok(HttpResponse::Ok().json(RowsResponse {
        rows: outcome.rows,
        meta: Some(outcome.report),
    }))
}

async fn list_rows(state: web::Data<AppState>) -> Result<HttpResponse> {
    let rows = state.service.list_rows().await?;
    Ok(HttpResponse::Ok().json(RowsResponse { rows, meta: None }))
}

/// Remote state of one batch, passed through as returned
async fn batch_status(
    state: web::Data<AppState>,
    query: web::Query<BatchStatusQuery>,
) -> Result<HttpResponse> {
    let batch_id = query.into_inner().batch_id.unwrap_or_default();
    let batch = state.service.batch_status(&batch_id).await?;
    Ok(HttpResponse::Ok().json(batch))
}

/// Raw JSONL content of an output file
async fn batch_result(
    state: web::Data<AppState>,
    query: web::Query<BatchResultQuery>,
) -> Result<HttpResponse> {
    let file_id = query.into_inner().file_id.unwrap_or_default();
    let content = state.service.batch_result(&file_id).await?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(content))
}

async fn remove_rows(
    state: web::Data<AppState>,
    request: web::Json<RemoveRowsRequest>,
) -> Result<HttpResponse> {
    let removed = state.service.remove_rows(request.into_inner().ids).await?;
    debug!(removed, "Remove request handled");
    Ok(HttpResponse::NoContent().finish())
}
