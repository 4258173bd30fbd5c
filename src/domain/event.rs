/// CompletionEvent entity
///
/// A completion event asserts that a habit was performed on a specific
/// calendar date. The logical key is (user_id, habit_id, date_for): the store
/// guarantees at most one event per key. There is no update path; a date is
/// either present (completed) or absent (not completed), and callers must
/// never assume a record exists for incomplete days.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use crate::domain::{HabitId, UserId};

/// A record of completing a habit on a specific calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionEvent {
    /// Which habit this completion is for
    pub habit_id: HabitId,
    /// Owning user
    pub user_id: UserId,
    /// The calendar date this completion is for. Logical key; all streak and
    /// aggregation math uses this field exclusively.
    pub date_for: NaiveDate,
    /// Truthy means "completed on this date"
    pub value: bool,
    /// Wall-clock creation time. Audit only.
    pub submitted_at: DateTime<Utc>,
    /// Wall-clock last-mutation time. Audit only.
    pub updated_at: DateTime<Utc>,
}

impl CompletionEvent {
    /// Create a new completion event for a date
    pub fn new(user_id: UserId, habit_id: HabitId, date_for: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            habit_id,
            user_id,
            date_for,
            value: true,
            submitted_at: now,
            updated_at: now,
        }
    }

    /// Rebuild an event from stored data (used by the storage layer)
    pub fn from_existing(
        user_id: UserId,
        habit_id: HabitId,
        date_for: NaiveDate,
        value: bool,
        submitted_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            habit_id,
            user_id,
            date_for,
            value,
            submitted_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_event_is_completed() {
        let event = CompletionEvent::new(
            UserId::new(),
            HabitId::new(),
            NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
        );

        assert!(event.value);
        assert_eq!(event.submitted_at, event.updated_at);
    }
}
