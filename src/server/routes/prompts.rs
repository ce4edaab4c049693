//! Prompt registration endpoint

use crate::server::state::AppState;
use crate::server::types::AddPromptsRequest;
use crate::utils::error::Result;
use actix_web::{HttpResponse, web};
use tracing::debug;

/// Configure prompt routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/prompts/add", web::post().to(add_prompts));
}

/// Register prompts as not submitted; ids already stored are ignored
async fn add_prompts(
    state: web::Data<AppState>,
    request: web::Json<AddPromptsRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;

    let added = state.service.add_prompts(request.prompts).await?;
    debug!(added, "Prompts registered");
    Ok(HttpResponse::NoContent().finish())
}
