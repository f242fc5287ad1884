//! Session and feedback handlers.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use super::{
    ApiErrorResponse, ErrorResponse, MessageResponse, db_error, json_rejection, path_rejection,
};
use crate::api::AppState;
use crate::db::{Database, NewSession, Session, SessionChanges, SessionRepository};

// =============================================================================
// DTOs
// =============================================================================

/// Session response DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = 1)]
    pub patient_id: i64,
    /// Creation time, RFC 3339 in UTC
    #[schema(example = "2025-01-01T09:30:00Z")]
    pub timestamp: String,
    #[schema(example = "Seasonal flu")]
    pub diagnosis: Option<String>,
    #[schema(example = "Rest and fluids")]
    pub treatment_plan: Option<String>,
    /// Latest submitted feedback
    #[schema(example = "Felt better after two days")]
    pub feedback: Option<String>,
}

impl From<Session> for SessionResponse {
    fn from(s: Session) -> Self {
        Self {
            id: s.id,
            patient_id: s.patient_id,
            timestamp: s.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            diagnosis: s.diagnosis,
            treatment_plan: s.treatment_plan,
            feedback: s.feedback,
        }
    }
}

/// Create session request DTO
///
/// Only the patient reference is accepted; diagnosis and treatment plan are
/// filled in later through an update.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSessionRequest {
    #[schema(example = 1)]
    pub patient_id: i64,
}

/// Update session request DTO (partial update)
///
/// Omitted fields stay unchanged, `null` clears a field.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateSessionRequest {
    #[serde(default, deserialize_with = "crate::serde_utils::double_option")]
    #[schema(value_type = Option<String>, example = "Seasonal flu")]
    pub diagnosis: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::serde_utils::double_option")]
    #[schema(value_type = Option<String>, example = "Rest and fluids")]
    pub treatment_plan: Option<Option<String>>,
}

impl From<UpdateSessionRequest> for SessionChanges {
    fn from(req: UpdateSessionRequest) -> Self {
        Self {
            diagnosis: req.diagnosis,
            treatment_plan: req.treatment_plan,
        }
    }
}

/// Submit feedback request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFeedbackRequest {
    /// Feedback text (non-empty)
    #[schema(example = "Felt better after two days")]
    pub feedback: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// List all sessions
#[utoipa::path(
    get,
    path = "/sessions",
    tag = "sessions",
    responses(
        (status = 200, description = "All sessions in insertion order", body = Vec<SessionResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_sessions<D: Database>(
    State(state): State<AppState<D>>,
) -> Result<Json<Vec<SessionResponse>>, ApiErrorResponse> {
    let sessions = state.db().sessions().list().await.map_err(db_error)?;

    Ok(Json(
        sessions.into_iter().map(SessionResponse::from).collect(),
    ))
}

/// Get a session by ID
#[utoipa::path(
    get,
    path = "/sessions/{id}",
    tag = "sessions",
    params(("id" = i64, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session found", body = SessionResponse),
        (status = 400, description = "Invalid session ID", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_session<D: Database>(
    State(state): State<AppState<D>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<SessionResponse>, ApiErrorResponse> {
    let Path(id) = path.map_err(path_rejection)?;
    let session = state.db().sessions().get(id).await.map_err(db_error)?;

    Ok(Json(SessionResponse::from(session)))
}

/// Create a session for an existing patient
#[utoipa::path(
    post,
    path = "/sessions",
    tag = "sessions",
    request_body = CreateSessionRequest,
    responses(
        (status = 200, description = "Session created", body = SessionResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse),
        (status = 422, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn create_session<D: Database>(
    State(state): State<AppState<D>>,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, ApiErrorResponse> {
    let Json(req) = payload.map_err(json_rejection)?;

    let session = state
        .db()
        .sessions()
        .create(&NewSession::for_patient(req.patient_id))
        .await
        .map_err(db_error)?;

    Ok(Json(SessionResponse::from(session)))
}

/// Update a session
///
/// Applies only the fields present in the body
#[utoipa::path(
    put,
    path = "/sessions/{id}",
    tag = "sessions",
    params(("id" = i64, Path, description = "Session ID")),
    request_body = UpdateSessionRequest,
    responses(
        (status = 200, description = "Session updated", body = SessionResponse),
        (status = 400, description = "Invalid session ID", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 422, description = "Invalid fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn update_session<D: Database>(
    State(state): State<AppState<D>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateSessionRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, ApiErrorResponse> {
    let Path(id) = path.map_err(path_rejection)?;
    let Json(req) = payload.map_err(json_rejection)?;

    let session = state
        .db()
        .sessions()
        .update(id, &SessionChanges::from(req))
        .await
        .map_err(db_error)?;

    Ok(Json(SessionResponse::from(session)))
}

/// Submit feedback for a session
///
/// Replaces the session's latest feedback and appends it to the history
#[utoipa::path(
    post,
    path = "/sessions/{id}/feedback",
    tag = "sessions",
    params(("id" = i64, Path, description = "Session ID")),
    request_body = CreateFeedbackRequest,
    responses(
        (status = 200, description = "Feedback recorded", body = MessageResponse),
        (status = 400, description = "Invalid session ID", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 422, description = "Missing or empty feedback", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn submit_feedback<D: Database>(
    State(state): State<AppState<D>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CreateFeedbackRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiErrorResponse> {
    let Path(id) = path.map_err(path_rejection)?;
    let Json(req) = payload.map_err(json_rejection)?;

    state
        .db()
        .sessions()
        .record_feedback(id, &req.feedback)
        .await
        .map_err(db_error)?;

    Ok(Json(MessageResponse {
        message: "Feedback submitted successfully".to_string(),
    }))
}
