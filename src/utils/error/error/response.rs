//! HTTP response handling for errors

use super::types::GatewayError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) | GatewayError::Parsing(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            GatewayError::HttpClient(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            GatewayError::Config(_) => ("CONFIG_ERROR", self.to_string()),
            GatewayError::Storage(_) => ("STORAGE_ERROR", "Row storage operation failed".to_string()),
            GatewayError::HttpClient(_) => ("UPSTREAM_UNREACHABLE", self.to_string()),
            GatewayError::Validation(_) => ("INVALID_REQUEST", self.to_string()),
            GatewayError::NotFound(_) => ("NOT_FOUND", self.to_string()),
            GatewayError::Upstream { .. } => ("UPSTREAM_ERROR", self.to_string()),
            GatewayError::Parsing(_) => ("PARSING_ERROR", self.to_string()),
            _ => ("INTERNAL_ERROR", "An internal error occurred".to_string()),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(self.status_code()).json(error_response)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}
