//! SQLite database connection and migration management.

use std::path::Path;
use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::debug;

use super::{SqliteFeedbackRepository, SqlitePatientRepository, SqliteSessionRepository};
use crate::db::{Database, DbError, DbResult};

// Embed migrations from data/sql/sqlite/migrations at compile time
static MIGRATOR: Migrator = sqlx::migrate!("./data/sql/sqlite/migrations");

/// SQLite database implementation.
///
/// Owns the connection pool for the lifetime of the process and hands out
/// borrowing repositories via associated types, avoiding dynamic dispatch.
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open (or create) a database file at the given path.
    pub async fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        debug!(path = %path.as_ref().display(), "Opened SQLite database");
        Ok(Self { pool })
    }

    /// Create an in-memory database (useful for testing).
    ///
    /// Each SQLite in-memory connection is its own database, so the pool is
    /// pinned to a single connection that is never recycled.
    pub async fn in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Access the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close all pooled connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl Database for SqliteDatabase {
    type Patients<'a> = SqlitePatientRepository<'a>;
    type Sessions<'a> = SqliteSessionRepository<'a>;
    type Feedback<'a> = SqliteFeedbackRepository<'a>;

    async fn migrate(&self) -> DbResult<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })?;
        Ok(())
    }

    fn patients(&self) -> Self::Patients<'_> {
        SqlitePatientRepository { pool: &self.pool }
    }

    fn sessions(&self) -> Self::Sessions<'_> {
        SqliteSessionRepository { pool: &self.pool }
    }

    fn feedback(&self) -> Self::Feedback<'_> {
        SqliteFeedbackRepository { pool: &self.pool }
    }
}
