//! Populate a clinic database with sample patients and sessions.

use std::path::PathBuf;

use clap::Parser;
use clinic::db::{Database, DbError, SqliteDatabase};
use clinic::seed::{SeedOutcome, seed_sample_data};
use miette::Diagnostic;
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(clinic::seed::database))]
    Database(#[from] DbError),
}

#[derive(Parser)]
#[command(name = "clinic-seed")]
#[command(author, version, about = "Load sample data into the clinic database", long_about = None)]
struct Cli {
    /// Database file path
    #[arg(long, default_value = "clinic.db")]
    db: PathBuf,
}

async fn seed(cli: &Cli) -> Result<SeedOutcome, BinaryError> {
    let db = SqliteDatabase::open(&cli.db).await?;
    db.migrate().await?;
    let outcome = seed_sample_data(&db).await?;
    db.close().await;
    Ok(outcome)
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    clinic::api::init_tracing();
    let cli = Cli::parse();

    match seed(&cli).await {
        Ok(SeedOutcome::AlreadySeeded) => info!("Sample data already exists, nothing to do"),
        Ok(SeedOutcome::Seeded { patients, sessions }) => {
            info!(patients, sessions, "Created sample patients and sessions")
        }
        Err(e) => {
            error!(error = %e, "Failed to create sample data");
            return Err(e);
        }
    }

    Ok(())
}
