//! HTTP handlers and their request/response DTOs.

mod patients;
mod sessions;
mod system;

#[cfg(test)]
mod sessions_test;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::db::DbError;

pub use patients::*;
pub use sessions::*;
pub use system::*;

/// Error response DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Session not found")]
    pub error: String,
}

/// Plain acknowledgement DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Feedback submitted successfully")]
    pub message: String,
}

/// Error half of every handler result.
pub type ApiErrorResponse = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, error: impl Into<String>) -> ApiErrorResponse {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

/// Map a storage error to an HTTP error.
///
/// Not-found names the entity type, validation becomes 422, and anything
/// else is logged and reported as 500.
pub(crate) fn db_error(e: DbError) -> ApiErrorResponse {
    match e {
        DbError::NotFound { entity_type, .. } => {
            error_response(StatusCode::NOT_FOUND, format!("{} not found", entity_type))
        }
        DbError::Validation { message } => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, message)
        }
        other => {
            error!(error = %other, "Database operation failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}

/// Map a body decode failure, keeping the decoder's field-level message.
pub(crate) fn json_rejection(rejection: JsonRejection) -> ApiErrorResponse {
    error_response(rejection.status(), rejection.body_text())
}

/// Map an unparseable path segment (e.g. a non-integer id).
pub(crate) fn path_rejection(rejection: PathRejection) -> ApiErrorResponse {
    error_response(rejection.status(), rejection.body_text())
}
