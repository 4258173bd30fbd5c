/// Storage layer for completion events
///
/// This module defines the persistence collaborator the engine is written
/// against. The store is the sole enforcer of the per-date uniqueness
/// invariant: a duplicate insert for the same (user, habit, date) must be
/// rejected here, not deduplicated upstream.

pub mod sqlite;
pub mod migrations;

// Re-export the main storage types
pub use sqlite::*;

use chrono::NaiveDate;
use thiserror::Error;
use crate::domain::{CompletionEvent, Habit, HabitId, UserId};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: String },

    #[error("Duplicate completion: habit {habit_id} already completed on {date}")]
    DuplicateCompletion { habit_id: String, date: String },

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Persistence interface for habits and their completion events
///
/// Implementations must keep at most one completion event per
/// (user_id, habit_id, date_for) and scope every query by user so a habit
/// that belongs to someone else is indistinguishable from a missing one.
pub trait CompletionStore {
    /// Register a habit so completions can be recorded against it
    fn register_habit(&self, habit: &Habit) -> Result<(), StorageError>;

    /// Get a habit by ID, scoped to its owner
    fn get_habit(&self, user_id: &UserId, habit_id: &HabitId) -> Result<Habit, StorageError>;

    /// List completion events for one habit, optionally bounded to an
    /// inclusive date range, ordered by date ascending
    fn list_completions(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<CompletionEvent>, StorageError>;

    /// Insert a completion event; a second event for the same date is
    /// rejected with `DuplicateCompletion`
    fn insert_completion(&self, event: &CompletionEvent) -> Result<(), StorageError>;

    /// Delete the completion event for one date. Returns whether a record
    /// existed; deleting an absent date is a no-op.
    fn delete_completion(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
        date_for: NaiveDate,
    ) -> Result<bool, StorageError>;
}
