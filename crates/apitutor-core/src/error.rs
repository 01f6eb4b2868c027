//! Unified error handling for the API tutor
//!
//! This module provides the error type covering every failure a request can
//! end in, with automatic HTTP response mapping.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Main application error type
///
/// All errors in the application should be converted to this type.
/// It implements `ResponseError` for automatic HTTP response generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    // ==================== Authentication Errors ====================
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Ownership mismatch. Also returned when the record does not exist,
    /// with the same body.
    #[error("Forbidden: you can only change customers you added")]
    Forbidden,

    // ==================== Validation Errors ====================
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// Carries the name of the offending field (`name`, `type`, or `id`
    /// for the placeholder id)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ==================== Resource Errors ====================
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    // ==================== Internal Errors ====================
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request (ownership refusals included)
            AppError::InvalidInput(_) | AppError::InvalidRoute(_) | AppError::Forbidden => {
                StatusCode::BAD_REQUEST
            }

            // 401 Unauthorized
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,

            // 404 Not Found
            AppError::MissingParameter(_) | AppError::NotFound(_) => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            AppError::Storage(_)
            | AppError::Serialization(_)
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Forbidden => "forbidden",
            AppError::MissingParameter(_) => "missing_parameter",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::NotFound(_) => "not_found",
            AppError::InvalidRoute(_) => "invalid_route",
            AppError::Storage(_) => "storage_error",
            AppError::Serialization(_) => "serialization_error",
            AppError::Config(_) => "config_error",
            AppError::Internal(_) => "internal_error",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        AppError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = json!({
            "error": self.error_code(),
            "message": self.to_string(),
            "status": status.as_u16(),
        });

        HttpResponse::build(status).json(body)
    }
}

// ==================== From implementations ====================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
