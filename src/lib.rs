//! Record-keeping backend for patients, clinical sessions, and feedback.
//!
//! - [`db`]: domain models, repository traits, SQLite storage
//! - [`api`]: HTTP handlers, routing, and the server entry point
//! - [`seed`]: sample data for local development

pub mod api;
pub mod db;
pub mod seed;
mod serde_utils;
