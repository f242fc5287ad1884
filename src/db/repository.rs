//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.
//! Methods return `Send` futures so handlers generic over [`Database`]
//! can be served by axum.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{Feedback, Id, NewPatient, NewSession, Patient, Session, SessionChanges},
};

/// Repository for Patient operations.
pub trait PatientRepository {
    /// Create a new patient and return it with its assigned ID.
    fn create(&self, patient: &NewPatient) -> impl Future<Output = DbResult<Patient>> + Send;

    /// Get a patient by ID.
    fn get(&self, id: Id) -> impl Future<Output = DbResult<Patient>> + Send;

    /// Get all patients in insertion order.
    fn list(&self) -> impl Future<Output = DbResult<Vec<Patient>>> + Send;

    /// Count stored patients.
    fn count(&self) -> impl Future<Output = DbResult<i64>> + Send;
}

/// Repository for Session operations.
pub trait SessionRepository {
    /// Create a session for an existing patient.
    ///
    /// Fails with `NotFound` for "Patient" when the patient does not exist.
    fn create(&self, session: &NewSession) -> impl Future<Output = DbResult<Session>> + Send;

    /// Get a session by ID.
    fn get(&self, id: Id) -> impl Future<Output = DbResult<Session>> + Send;

    /// Get all sessions in insertion order.
    fn list(&self) -> impl Future<Output = DbResult<Vec<Session>>> + Send;

    /// Apply a partial update and return the stored result.
    fn update(
        &self,
        id: Id,
        changes: &SessionChanges,
    ) -> impl Future<Output = DbResult<Session>> + Send;

    /// Overwrite the session's feedback and append a feedback record, atomically.
    fn record_feedback(
        &self,
        id: Id,
        content: &str,
    ) -> impl Future<Output = DbResult<Feedback>> + Send;
}

/// Read access to the append-only feedback history.
pub trait FeedbackRepository {
    /// All feedback for a session, oldest first.
    fn list_for_session(
        &self,
        session_id: Id,
    ) -> impl Future<Output = DbResult<Vec<Feedback>>> + Send;
}

/// Combined database interface.
pub trait Database: Send + Sync + 'static {
    type Patients<'a>: PatientRepository + Send + Sync
    where
        Self: 'a;
    type Sessions<'a>: SessionRepository + Send + Sync
    where
        Self: 'a;
    type Feedback<'a>: FeedbackRepository + Send + Sync
    where
        Self: 'a;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the patient repository.
    fn patients(&self) -> Self::Patients<'_>;

    /// Get the session repository.
    fn sessions(&self) -> Self::Sessions<'_>;

    /// Get the feedback repository.
    fn feedback(&self) -> Self::Feedback<'_>;
}
