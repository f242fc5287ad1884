//! Clinic API server binary.
//!
//! This binary creates the concrete database implementation and passes it
//! to the API server. The API layer remains agnostic of the storage backend.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use clinic::api::{self, ApiError, Config, DEFAULT_CORS_ORIGINS};
use clinic::db::{Database, DbError, SqliteDatabase};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(clinic::binary::database))]
    Database(#[from] DbError),

    #[error("Failed to create data directory: {0}")]
    #[diagnostic(code(clinic::binary::io))]
    Io(#[from] std::io::Error),

    #[error("API server error: {0}")]
    #[diagnostic(code(clinic::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "clinic-api")]
#[command(author, version, about = "Clinic records API server", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Database file path
    #[arg(long, default_value = "clinic.db")]
    db: PathBuf,

    /// Allowed CORS origin (repeatable)
    #[arg(long = "cors-origin", default_values_t = DEFAULT_CORS_ORIGINS.map(String::from))]
    cors_origins: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let cli = Cli::parse();

    println!("Opening database at {:?}", cli.db);

    // Ensure parent directory exists
    if let Some(parent) = cli.db.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let db = SqliteDatabase::open(&cli.db).await?;

    // Run migrations before starting the server
    db.migrate().await?;
    println!("Database migrations complete");

    api::run(
        Config {
            host: cli.host,
            port: cli.port,
            cors_origins: cli.cors_origins,
        },
        db,
    )
    .await?;

    Ok(())
}
