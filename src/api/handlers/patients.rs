//! Patient handlers.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use super::{ApiErrorResponse, ErrorResponse, db_error, json_rejection, path_rejection};
use crate::api::AppState;
use crate::db::{Database, NewPatient, Patient, PatientRepository};

// =============================================================================
// DTOs (Data Transfer Objects)
// =============================================================================

/// Patient response DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PatientResponse {
    /// Storage-assigned identifier
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Ana")]
    pub name: String,
    #[schema(example = 30)]
    pub age: i64,
    #[schema(example = "Asthma")]
    pub medical_history: Option<String>,
}

impl From<Patient> for PatientResponse {
    fn from(p: Patient) -> Self {
        Self {
            id: p.id,
            name: p.name,
            age: p.age,
            medical_history: p.medical_history,
        }
    }
}

/// Create patient request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePatientRequest {
    /// Patient name (non-empty, at most 100 characters)
    #[schema(example = "Ana")]
    pub name: String,
    #[schema(example = 30)]
    pub age: i64,
    #[schema(example = "Asthma")]
    pub medical_history: Option<String>,
}

impl From<CreatePatientRequest> for NewPatient {
    fn from(req: CreatePatientRequest) -> Self {
        Self {
            name: req.name,
            age: req.age,
            medical_history: req.medical_history,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// List all patients
#[utoipa::path(
    get,
    path = "/patients",
    tag = "patients",
    responses(
        (status = 200, description = "All patients in insertion order", body = Vec<PatientResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_patients<D: Database>(
    State(state): State<AppState<D>>,
) -> Result<Json<Vec<PatientResponse>>, ApiErrorResponse> {
    let patients = state.db().patients().list().await.map_err(db_error)?;

    Ok(Json(
        patients.into_iter().map(PatientResponse::from).collect(),
    ))
}

/// Get a patient by ID
#[utoipa::path(
    get,
    path = "/patients/{id}",
    tag = "patients",
    params(
        ("id" = i64, Path, description = "Patient ID")
    ),
    responses(
        (status = 200, description = "Patient found", body = PatientResponse),
        (status = 400, description = "Invalid patient ID", body = ErrorResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_patient<D: Database>(
    State(state): State<AppState<D>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<PatientResponse>, ApiErrorResponse> {
    let Path(id) = path.map_err(path_rejection)?;
    let patient = state.db().patients().get(id).await.map_err(db_error)?;

    Ok(Json(PatientResponse::from(patient)))
}

/// Create a new patient
#[utoipa::path(
    post,
    path = "/patients",
    tag = "patients",
    request_body = CreatePatientRequest,
    responses(
        (status = 200, description = "Patient created", body = PatientResponse),
        (status = 422, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn create_patient<D: Database>(
    State(state): State<AppState<D>>,
    payload: Result<Json<CreatePatientRequest>, JsonRejection>,
) -> Result<Json<PatientResponse>, ApiErrorResponse> {
    let Json(req) = payload.map_err(json_rejection)?;

    let patient = state
        .db()
        .patients()
        .create(&NewPatient::from(req))
        .await
        .map_err(db_error)?;

    Ok(Json(PatientResponse::from(patient)))
}
