//! HTTP route modules
//!
//! This module contains all HTTP route handlers organized by functionality.

pub mod batch;
pub mod health;
pub mod prompts;

use actix_web::web;

/// Register every API route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    health::configure_routes(cfg);
    prompts::configure_routes(cfg);
    batch::configure_routes(cfg);
}
