//! API error types with IntoResponse
//!
//! Errors are converted to HTTP responses. Not-found responses carry no
//! body, matching the wire contract; database errors are logged and
//! masked as generic 500s.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::Violation;

/// Fixed message for a write referencing a nonexistent tema
pub const TEMA_NAO_EXISTE: &str = "Tema não existe!";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// One or more field constraints violated (400)
    Validation(Vec<Violation>),

    /// Referenced resource absent (404, empty body)
    NotFound { resource: &'static str, id: i64 },

    /// Write references a tema that does not exist (400)
    TemaInexistente,

    /// Database error (500, logged)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(violations) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "validation_error",
                    "violations": violations,
                })),
            )
                .into_response(),
            Self::NotFound { resource, id } => {
                tracing::debug!(resource, id, "resource not found");
                StatusCode::NOT_FOUND.into_response()
            }
            Self::TemaInexistente => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "bad_request",
                    "message": TEMA_NAO_EXISTE,
                })),
            )
                .into_response(),
            Self::Database(e) => {
                // Log the actual error, return a generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "internal_error",
                        "message": "an internal error occurred",
                    })),
                )
                    .into_response()
            }
        }
    }
}

impl From<Vec<Violation>> for ApiError {
    fn from(violations: Vec<Violation>) -> Self {
        Self::Validation(violations)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            _ => Self::Database(e),
        }
    }
}
