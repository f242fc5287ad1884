//! Domain models for the clinic database.
//!
//! These models are storage-agnostic and represent the core entities
//! used throughout the application. Wire shapes live in the API layer.

use chrono::{DateTime, Utc};

use crate::db::{DbError, DbResult};

/// Storage-assigned identifier used for all entities.
pub type Id = i64;

/// A person receiving care. Owns zero or more sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub id: Id,
    pub name: String,
    pub age: i64,
    pub medical_history: Option<String>,
}

/// Maximum stored length of a patient name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Fields accepted when creating a patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
    pub name: String,
    pub age: i64,
    pub medical_history: Option<String>,
}

impl NewPatient {
    /// Check the fields the type system cannot express.
    pub fn validate(&self) -> DbResult<()> {
        if self.name.trim().is_empty() {
            return Err(DbError::Validation {
                message: "name must not be empty".to_string(),
            });
        }
        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(DbError::Validation {
                message: format!("name must be at most {} characters", MAX_NAME_LEN),
            });
        }
        Ok(())
    }
}

/// A single clinical encounter tied to one patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: Id,
    pub patient_id: Id,
    /// Set at insert time, never client-supplied.
    pub timestamp: DateTime<Utc>,
    pub diagnosis: Option<String>,
    pub treatment_plan: Option<String>,
    /// Copy of the most recently submitted feedback.
    pub feedback: Option<String>,
}

/// Fields accepted when creating a session.
///
/// Sessions start without diagnosis or treatment plan; those are filled in
/// through [`SessionChanges`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub patient_id: Id,
    /// Insert time override, used by the sample-data seeder.
    pub timestamp: Option<DateTime<Utc>>,
    pub diagnosis: Option<String>,
    pub treatment_plan: Option<String>,
}

impl NewSession {
    /// An empty session for the given patient, stamped at insert time.
    pub fn for_patient(patient_id: Id) -> Self {
        Self {
            patient_id,
            timestamp: None,
            diagnosis: None,
            treatment_plan: None,
        }
    }
}

/// Partial update for a session.
///
/// Each field is three-state:
/// - `None` leaves the stored value unchanged
/// - `Some(None)` clears it
/// - `Some(Some(v))` sets it to `v` (empty strings included)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionChanges {
    pub diagnosis: Option<Option<String>>,
    pub treatment_plan: Option<Option<String>>,
}

impl SessionChanges {
    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        self.diagnosis.is_none() && self.treatment_plan.is_none()
    }

    /// Apply the present fields to `target`, leaving the rest untouched.
    pub fn apply_to(self, target: &mut Session) {
        merge_field(&mut target.diagnosis, self.diagnosis);
        merge_field(&mut target.treatment_plan, self.treatment_plan);
    }
}

fn merge_field<T>(slot: &mut Option<T>, change: Option<Option<T>>) {
    if let Some(value) = change {
        *slot = value;
    }
}

/// Reject blank feedback text.
pub fn validate_feedback(content: &str) -> DbResult<()> {
    if content.trim().is_empty() {
        return Err(DbError::Validation {
            message: "feedback must not be empty".to_string(),
        });
    }
    Ok(())
}

/// An immutable note attached to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub id: Id,
    pub session_id: Id,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
