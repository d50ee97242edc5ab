//! Common error types for the gateway

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Engine initialization failed: {0}")]
    EngineInit(String),

    #[error("No images generated")]
    EmptyResult,

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Error response format: a flat `{"error": "<message>"}` object
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            // Sticky until restart; clients should back off rather than retry hot.
            AppError::EngineInit(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::EmptyResult => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
