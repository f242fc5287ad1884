//! API route configuration.

use axum::Router;
use axum::routing::{get, post, put};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{
    self, CreateFeedbackRequest, CreatePatientRequest, CreateSessionRequest, ErrorResponse,
    MessageResponse, PatientResponse, RootResponse, SessionResponse, UpdateSessionRequest,
};
use super::state::AppState;
use crate::db::Database;

/// Build routes with generic database type.
///
/// Registers handlers that are generic over the Database trait, applying
/// the turbofish automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Healthcare Web App API",
        version = "1.0.0",
        description = "API for managing healthcare patients and sessions"
    ),
    paths(
        handlers::root,
        handlers::list_patients,
        handlers::get_patient,
        handlers::create_patient,
        handlers::list_sessions,
        handlers::get_session,
        handlers::create_session,
        handlers::update_session,
        handlers::submit_feedback,
    ),
    components(
        schemas(
            RootResponse,
            PatientResponse,
            CreatePatientRequest,
            SessionResponse,
            CreateSessionRequest,
            UpdateSessionRequest,
            CreateFeedbackRequest,
            MessageResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "Liveness endpoint"),
        (name = "patients", description = "Patient records"),
        (name = "sessions", description = "Clinical sessions and feedback")
    )
)]
pub struct ApiDoc;

/// Create the API router with OpenAPI documentation
pub fn create_router<D: Database>(state: AppState<D>) -> Router {
    let api = ApiDoc::openapi();

    let system_routes = Router::new().route("/", get(handlers::root));

    let patient_routes = routes!(D => {
        get "/patients" => handlers::list_patients,
        get "/patients/{id}" => handlers::get_patient,
        post "/patients" => handlers::create_patient,
    });

    let session_routes = routes!(D => {
        get "/sessions" => handlers::list_sessions,
        get "/sessions/{id}" => handlers::get_session,
        post "/sessions" => handlers::create_session,
        put "/sessions/{id}" => handlers::update_session,
        post "/sessions/{id}/feedback" => handlers::submit_feedback,
    });

    system_routes
        .merge(patient_routes)
        .merge(session_routes)
        .merge(Scalar::with_url("/docs", api))
        .with_state(state)
}
