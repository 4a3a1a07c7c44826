//! Error types for the storefront backend
//!
//! Provides unified error handling using thiserror. The cache itself never
//! fails; these cover validation and upstream calls around it.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Per-field validation messages, keyed by wire field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

// == App Error Enum ==
/// Unified error type for the storefront backend.
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed or disallowed input
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Album payload failed field validation
    #[error("Invalid album: {}", summarize(.0))]
    InvalidFields(FieldErrors),

    /// Resource absent upstream
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream call failed or returned a non-success status
    #[error("Upstream error: {0}")]
    Upstream(String),
}

fn summarize(fields: &FieldErrors) -> String {
    fields.keys().cloned().collect::<Vec<_>>().join(", ")
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Upstream("request timeout".to_string())
        } else if let Some(status) = err.status() {
            AppError::Upstream(format!("upstream returned {}", status))
        } else if err.is_decode() {
            AppError::Upstream(format!("invalid upstream response: {}", err))
        } else {
            AppError::Upstream(format!("network error: {}", err))
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::InvalidFields(fields) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Missing or invalid fields", "fields": fields }),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::Upstream(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the storefront backend.
pub type Result<T> = std::result::Result<T, AppError>;
