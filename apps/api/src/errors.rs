use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::{truncate_for_log, LlmError};

const MAX_LOGGED_CONTENT_CHARS: usize = 300;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream error: {0}")]
    Upstream(#[from] LlmError),

    /// Provider content that could not be decoded into a schedule.
    /// `raw` keeps the offending content for diagnosis.
    #[error("Parse error: {message}")]
    Parse { message: String, raw: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Upstream(LlmError::Timeout(_)) => "UPSTREAM_TIMEOUT",
            AppError::Upstream(_) => "UPSTREAM_ERROR",
            AppError::Parse { .. } => "PARSE_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Upstream failures worth another attempt. Everything else is final.
    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::Upstream(e) if e.is_transient())
    }
}

/// Malformed request bodies surface as validation errors with the usual error shape.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (StatusCode::SERVICE_UNAVAILABLE, msg.clone())
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Upstream(LlmError::Timeout(_)) => {
                tracing::error!("Upstream error: {self}");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "The study plan provider timed out. Please try again.".to_string(),
                )
            }
            AppError::Upstream(LlmError::Api { status, body }) => {
                tracing::error!(
                    status = *status,
                    body_len = body.len(),
                    body = %truncate_for_log(body, MAX_LOGGED_CONTENT_CHARS),
                    "Upstream API error"
                );
                (StatusCode::BAD_GATEWAY, format!("API Error: {status}"))
            }
            AppError::Upstream(e) => {
                tracing::error!("Upstream error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "The study plan provider could not be reached".to_string(),
                )
            }
            AppError::Parse { message, raw } => {
                tracing::error!(
                    content_len = raw.len(),
                    content = %truncate_for_log(raw, MAX_LOGGED_CONTENT_CHARS),
                    "Parse error: {message}"
                );
                (
                    StatusCode::BAD_GATEWAY,
                    "Failed to parse schedule data".to_string(),
                )
            }
            AppError::Serialization(msg) => {
                tracing::error!("Serialization error: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    format!("Export failed: {msg}"),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}
