//! Liveness handler.

use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

/// Liveness response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    #[schema(example = "Healthcare Web App API")]
    pub message: String,
    /// Service status
    #[schema(example = "running")]
    pub status: String,
}

/// Liveness check
#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses(
        (status = 200, description = "Service is running", body = RootResponse)
    )
)]
#[instrument]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Healthcare Web App API".to_string(),
        status: "running".to_string(),
    })
}
