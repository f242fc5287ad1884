//! SQLite SessionRepository implementation.

use sqlx::{Sqlite, SqlitePool};
use tracing::debug;

use super::helpers::{SESSION_COLUMNS, map_write_error, session_from_row};
use crate::db::utils::current_timestamp;
use crate::db::{
    DbError, DbResult, Feedback, Id, NewSession, Session, SessionChanges, SessionRepository,
    validate_feedback,
};

/// SQLx-backed session repository.
pub struct SqliteSessionRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

/// Fetch one session through any executor (pool or open transaction).
async fn fetch_session<'e, E>(executor: E, id: Id) -> DbResult<Session>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let sql = format!("SELECT {} FROM session WHERE id = ?", SESSION_COLUMNS);
    let row = sqlx::query(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| DbError::not_found("Session", id))?;

    session_from_row(&row)
}

impl<'a> SessionRepository for SqliteSessionRepository<'a> {
    async fn create(&self, session: &NewSession) -> DbResult<Session> {
        let mut tx = self.pool.begin().await?;

        // Patient must exist at creation time
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM patient WHERE id = ?)")
            .bind(session.patient_id)
            .fetch_one(&mut *tx)
            .await?;

        if !exists {
            return Err(DbError::not_found("Patient", session.patient_id));
        }

        let timestamp = session.timestamp.unwrap_or_else(current_timestamp);

        let id = sqlx::query(
            "INSERT INTO session (patient_id, timestamp, diagnosis, treatment_plan) VALUES (?, ?, ?, ?)",
        )
        .bind(session.patient_id)
        .bind(timestamp)
        .bind(&session.diagnosis)
        .bind(&session.treatment_plan)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, "Patient", session.patient_id))?
        .last_insert_rowid();

        tx.commit().await?;

        debug!(id, patient_id = session.patient_id, "Created session");

        Ok(Session {
            id,
            patient_id: session.patient_id,
            timestamp,
            diagnosis: session.diagnosis.clone(),
            treatment_plan: session.treatment_plan.clone(),
            feedback: None,
        })
    }

    async fn get(&self, id: Id) -> DbResult<Session> {
        fetch_session(self.pool, id).await
    }

    async fn list(&self) -> DbResult<Vec<Session>> {
        let sql = format!("SELECT {} FROM session ORDER BY id", SESSION_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(self.pool).await?;

        rows.iter().map(session_from_row).collect()
    }

    async fn update(&self, id: Id, changes: &SessionChanges) -> DbResult<Session> {
        let mut tx = self.pool.begin().await?;

        let mut session = fetch_session(&mut *tx, id).await?;
        if changes.is_empty() {
            return Ok(session);
        }
        changes.clone().apply_to(&mut session);

        sqlx::query("UPDATE session SET diagnosis = ?, treatment_plan = ? WHERE id = ?")
            .bind(&session.diagnosis)
            .bind(&session.treatment_plan)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(id, "Updated session");
        Ok(session)
    }

    async fn record_feedback(&self, id: Id, content: &str) -> DbResult<Feedback> {
        validate_feedback(content)?;

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("UPDATE session SET feedback = ? WHERE id = ?")
            .bind(content)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Session", id));
        }

        let created_at = current_timestamp();

        let feedback_id =
            sqlx::query("INSERT INTO feedback (session_id, content, created_at) VALUES (?, ?, ?)")
                .bind(id)
                .bind(content)
                .bind(created_at)
                .execute(&mut *tx)
                .await
                .map_err(|e| map_write_error(e, "Session", id))?
                .last_insert_rowid();

        tx.commit().await?;

        debug!(session_id = id, feedback_id, "Recorded feedback");

        Ok(Feedback {
            id: feedback_id,
            session_id: id,
            content: content.to_string(),
            created_at,
        })
    }
}
