//! SQLite implementation of the database traits.
//!
//! This module provides a SQLx-backed implementation of the repository
//! traits defined in the parent module.

mod connection;
mod feedback;
mod helpers;
mod patient;
mod session;


pub use connection::SqliteDatabase;
pub use feedback::SqliteFeedbackRepository;
pub use patient::SqlitePatientRepository;
pub use session::SqliteSessionRepository;
