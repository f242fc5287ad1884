//! Sample data for local development.

use chrono::Duration;
use tracing::info;

use crate::db::utils::current_timestamp;
use crate::db::{Database, DbResult, NewPatient, NewSession, PatientRepository, SessionRepository};

/// What a seeding run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Patients already existed; nothing was written.
    AlreadySeeded,
    Seeded { patients: usize, sessions: usize },
}

fn sample_patients() -> Vec<NewPatient> {
    [
        ("John Smith", 45, "Hypertension, diabetes type 2"),
        ("Sarah Johnson", 32, "Asthma, allergies to penicillin"),
        ("Michael Brown", 67, "Heart disease, high cholesterol"),
        ("Emily Davis", 28, "No significant medical history"),
        ("Robert Wilson", 55, "Arthritis, previous knee surgery"),
    ]
    .into_iter()
    .map(|(name, age, history)| NewPatient {
        name: name.to_string(),
        age,
        medical_history: Some(history.to_string()),
    })
    .collect()
}

/// (patient index, days ago, diagnosis, treatment plan)
const SAMPLE_SESSIONS: [(usize, i64, &str, &str); 5] = [
    (
        0,
        7,
        "Hypertension management checkup",
        "Continue current medication, monitor blood pressure daily",
    ),
    (
        1,
        5,
        "Asthma exacerbation",
        "Increase inhaler usage, avoid known triggers",
    ),
    (
        2,
        3,
        "Routine cardiac follow-up",
        "Continue statin therapy, schedule stress test",
    ),
    (
        3,
        1,
        "Annual physical examination",
        "All normal, continue healthy lifestyle",
    ),
    (
        0,
        0,
        "Diabetes management",
        "Adjust insulin dosage, dietary consultation",
    ),
];

/// Insert sample patients and sessions into an empty database.
///
/// Does nothing when any patient exists. Stops at the first failed write.
pub async fn seed_sample_data<D: Database>(db: &D) -> DbResult<SeedOutcome> {
    if db.patients().count().await? > 0 {
        info!("Sample data already exists");
        return Ok(SeedOutcome::AlreadySeeded);
    }

    let mut patient_ids = Vec::new();
    for patient in sample_patients() {
        patient_ids.push(db.patients().create(&patient).await?.id);
    }

    let now = current_timestamp();
    for (index, days_ago, diagnosis, plan) in SAMPLE_SESSIONS {
        let session = NewSession {
            timestamp: Some(now - Duration::days(days_ago)),
            diagnosis: Some(diagnosis.to_string()),
            treatment_plan: Some(plan.to_string()),
            ..NewSession::for_patient(patient_ids[index])
        };
        db.sessions().create(&session).await?;
    }

    let outcome = SeedOutcome::Seeded {
        patients: patient_ids.len(),
        sessions: SAMPLE_SESSIONS.len(),
    };
    info!(?outcome, "Sample data created");
    Ok(outcome)
}
