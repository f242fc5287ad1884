//! HTTP API: router, middleware, and server lifecycle.

mod handlers;
pub(crate) mod routes;
mod state;


use std::net::IpAddr;

use axum::Router;
use axum::http::HeaderValue;
use miette::Diagnostic;
use thiserror::Error;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::Database;

pub use handlers::{
    CreateFeedbackRequest, CreatePatientRequest, CreateSessionRequest, ErrorResponse,
    MessageResponse, PatientResponse, RootResponse, SessionResponse, UpdateSessionRequest,
};
pub use routes::ApiDoc;
pub use state::AppState;

/// Browser origins allowed by default (the local web front end).
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// API server errors.
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Failed to bind {addr}: {source}")]
    #[diagnostic(code(clinic::api::bind))]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(clinic::api::serve))]
    Serve(#[from] std::io::Error),

    #[error("Invalid CORS origin '{origin}'")]
    #[diagnostic(
        code(clinic::api::cors_origin),
        help("Origins look like http://localhost:3000")
    )]
    InvalidOrigin { origin: String },
}

/// API server configuration
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Origins allowed to make credentialed cross-origin requests
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8000,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

/// Initialize tracing subscriber with env filter
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clinic=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the CORS layer for the configured origins.
fn cors_layer(origins: &[String]) -> Result<CorsLayer, ApiError> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ApiError::InvalidOrigin {
                origin: origin.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Credentials cannot be combined with wildcard methods/headers, so mirror them
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// Build the full application: routes plus tracing and CORS layers.
pub fn build_app<D: Database>(state: AppState<D>, config: &Config) -> Result<Router, ApiError> {
    Ok(routes::create_router(state)
        .layer(cors_layer(&config.cors_origins)?)
        .layer(TraceLayer::new_for_http()))
}

/// Run the API server with the given configuration and database.
///
/// The database is owned by the server state and released when the server
/// stops after Ctrl-C.
pub async fn run<D: Database>(config: Config, db: D) -> Result<(), ApiError> {
    init_tracing();

    let app = build_app(AppState::new(db), &config)?;

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ApiError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("API server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the process is killed
        std::future::pending::<()>().await;
    }
}
