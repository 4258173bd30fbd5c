/// Engine module: caller-facing error taxonomy and the bulk coordinator
///
/// The pure calculators live in `domain`; this layer owns the pieces that
/// talk to the store on behalf of a caller and the error surface those
/// callers see.

pub mod bulk;

pub use bulk::*;

use thiserror::Error;
use crate::domain::DomainError;
use crate::storage::StorageError;

/// Errors surfaced to callers of engine operations
#[derive(Error, Debug)]
pub enum EngineError {
    /// Caller has no valid user identity; rejected before any computation
    #[error("Not authenticated")]
    Unauthenticated,

    /// Target habit does not exist or does not belong to the caller
    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: String },

    /// Malformed input, typically a date string that is not yyyy-MM-dd
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The persistence layer failed on read or write
    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for EngineError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::HabitNotFound { habit_id } => EngineError::HabitNotFound { habit_id },
            other => EngineError::Storage(other),
        }
    }
}
