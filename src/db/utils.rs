//! Database utility functions.

use chrono::{DateTime, SubsecRound, Utc};

/// Current UTC time truncated to whole seconds.
///
/// Timestamps are stored with second precision so the value returned from a
/// create call matches what a later read returns.
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}
