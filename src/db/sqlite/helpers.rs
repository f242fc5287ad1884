//! Shared helper functions for SQLite repositories.

use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::db::{DbError, DbResult, Feedback, Id, Patient, Session};

pub const PATIENT_COLUMNS: &str = "id, name, age, medical_history";

pub const SESSION_COLUMNS: &str =
    "id, patient_id, timestamp, diagnosis, treatment_plan, feedback";

pub const FEEDBACK_COLUMNS: &str = "id, session_id, content, created_at";

pub fn patient_from_row(row: &SqliteRow) -> DbResult<Patient> {
    Ok(Patient {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        age: row.try_get("age")?,
        medical_history: row.try_get("medical_history")?,
    })
}

pub fn session_from_row(row: &SqliteRow) -> DbResult<Session> {
    Ok(Session {
        id: row.try_get("id")?,
        patient_id: row.try_get("patient_id")?,
        timestamp: row.try_get("timestamp")?,
        diagnosis: row.try_get("diagnosis")?,
        treatment_plan: row.try_get("treatment_plan")?,
        feedback: row.try_get("feedback")?,
    })
}

pub fn feedback_from_row(row: &SqliteRow) -> DbResult<Feedback> {
    Ok(Feedback {
        id: row.try_get("id")?,
        session_id: row.try_get("session_id")?,
        content: row.try_get("content")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Map a write error, turning a foreign-key violation into `NotFound` for
/// the referenced parent.
pub fn map_write_error(e: sqlx::Error, parent_type: &str, parent_id: Id) -> DbError {
    let is_fk_violation = e
        .as_database_error()
        .is_some_and(|db_err| db_err.is_foreign_key_violation());

    if is_fk_violation {
        DbError::not_found(parent_type, parent_id)
    } else {
        DbError::from(e)
    }
}
