/// Minimal habit record
///
/// The engine does not manage habit metadata (renames, categories, schedules
/// and the rest of habit CRUD live elsewhere). A habit exists here only so
/// completions have an owner to be scoped against: every read and write is
/// keyed by (user_id, habit_id), and mutations are rejected up front when the
/// habit is missing or belongs to someone else.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::{DomainError, HabitId, UserId};

/// A habit a user tracks completions against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Owning user; all operations are scoped to this pair
    pub user_id: UserId,
    /// Display name
    pub name: String,
    /// When this habit was registered
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// Create a new habit with a validated name
    pub fn new(user_id: UserId, name: String) -> Result<Self, DomainError> {
        Self::validate_name(&name)?;

        Ok(Self {
            id: HabitId::new(),
            user_id,
            name,
            created_at: Utc::now(),
        })
    }

    /// Rebuild a habit from stored data (used by the storage layer)
    pub fn from_existing(
        id: HabitId,
        user_id: UserId,
        name: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            name,
            created_at,
        }
    }

    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string(),
            ));
        }

        if trimmed.len() > 100 {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be longer than 100 characters".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_valid_habit() {
        let user = UserId::new();
        let habit = Habit::new(user.clone(), "Morning Run".to_string()).unwrap();

        assert_eq!(habit.user_id, user);
        assert_eq!(habit.name, "Morning Run");
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = Habit::new(UserId::new(), "  ".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_overlong_name_rejected() {
        let result = Habit::new(UserId::new(), "x".repeat(101));
        assert!(result.is_err());
    }
}
