//! Type conversions for GatewayError

use super::types::GatewayError;

impl From<actix_web::error::JsonPayloadError> for GatewayError {
    fn from(err: actix_web::error::JsonPayloadError) -> Self {
        GatewayError::Validation(format!("Invalid JSON body: {}", err))
    }
}

impl From<actix_web::error::QueryPayloadError> for GatewayError {
    fn from(err: actix_web::error::QueryPayloadError) -> Self {
        GatewayError::Validation(format!("Invalid query string: {}", err))
    }
}
