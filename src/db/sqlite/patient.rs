//! SQLite PatientRepository implementation.

use sqlx::SqlitePool;
use tracing::debug;

use super::helpers::{PATIENT_COLUMNS, patient_from_row};
use crate::db::{DbError, DbResult, Id, NewPatient, Patient, PatientRepository};

/// SQLx-backed patient repository.
pub struct SqlitePatientRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> PatientRepository for SqlitePatientRepository<'a> {
    async fn create(&self, patient: &NewPatient) -> DbResult<Patient> {
        patient.validate()?;

        let id = sqlx::query("INSERT INTO patient (name, age, medical_history) VALUES (?, ?, ?)")
            .bind(&patient.name)
            .bind(patient.age)
            .bind(&patient.medical_history)
            .execute(self.pool)
            .await?
            .last_insert_rowid();

        debug!(id, "Created patient");

        Ok(Patient {
            id,
            name: patient.name.clone(),
            age: patient.age,
            medical_history: patient.medical_history.clone(),
        })
    }

    async fn get(&self, id: Id) -> DbResult<Patient> {
        let sql = format!("SELECT {} FROM patient WHERE id = ?", PATIENT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Patient", id))?;

        patient_from_row(&row)
    }

    async fn list(&self) -> DbResult<Vec<Patient>> {
        let sql = format!("SELECT {} FROM patient ORDER BY id", PATIENT_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(self.pool).await?;

        rows.iter().map(patient_from_row).collect()
    }

    async fn count(&self) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM patient")
            .fetch_one(self.pool)
            .await?;
        Ok(total)
    }
}
