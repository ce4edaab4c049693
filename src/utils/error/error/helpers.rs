//! Helper functions for creating specific error types

use super::types::GatewayError;

/// Helper functions for creating specific errors
impl GatewayError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn parsing<S: Into<String>>(message: S) -> Self {
        Self::Parsing(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn upstream<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }
}

impl GatewayError {
    /// Whether the error was caused by the caller's input
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }

    /// Upstream HTTP status, if the error came from the batch API
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            Self::HttpClient(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
