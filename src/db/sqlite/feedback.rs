//! SQLite FeedbackRepository implementation.

use sqlx::SqlitePool;

use super::helpers::{FEEDBACK_COLUMNS, feedback_from_row};
use crate::db::{DbResult, Feedback, FeedbackRepository, Id};

/// SQLx-backed feedback history reader.
///
/// Feedback is written through [`crate::db::SessionRepository::record_feedback`]
/// so the session copy and the history row change together.
pub struct SqliteFeedbackRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> FeedbackRepository for SqliteFeedbackRepository<'a> {
    async fn list_for_session(&self, session_id: Id) -> DbResult<Vec<Feedback>> {
        let sql = format!(
            "SELECT {} FROM feedback WHERE session_id = ? ORDER BY id",
            FEEDBACK_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(session_id)
            .fetch_all(self.pool)
            .await?;

        rows.iter().map(feedback_from_row).collect()
    }
}
