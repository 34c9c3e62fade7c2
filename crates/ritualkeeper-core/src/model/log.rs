//! Completion log records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable record that a ritual was completed on a calendar day.
///
/// `essence_gained` stores the amount actually credited (after any buff
/// multiplier), so an undo can reverse the exact value without recomputing
/// it under possibly-changed rules. At most one log exists per
/// (ritual, date) pair; logs are appended and removed, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionLog {
    pub id: Uuid,
    pub ritual_id: Uuid,
    pub account_id: Uuid,
    pub date: NaiveDate,
    pub essence_gained: i64,
    pub logged_at: DateTime<Utc>,
}

impl CompletionLog {
    pub fn new(
        ritual_id: Uuid,
        account_id: Uuid,
        date: NaiveDate,
        essence_gained: i64,
        logged_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            ritual_id,
            account_id,
            date,
            essence_gained,
            logged_at,
        }
    }
}
