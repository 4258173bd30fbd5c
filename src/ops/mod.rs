/// Operation handlers for the engine
///
/// Each submodule pairs serde param/response structs with a handler function
/// that is generic over the store, so the operations are callable from any
/// interface style (the JSON-RPC server, a test harness, or an embedding
/// application) without pulling in the transport.
///
/// Identity rules shared by every operation: a missing or invalid `user_id`
/// is rejected as unauthenticated before anything else runs; a habit that
/// does not exist or belongs to another user is rejected as not-found before
/// any mutation.

pub mod register;
pub mod streaks;
pub mod performance;
pub mod bulk;

// Re-export operation functions for easy access
pub use register::*;
pub use streaks::*;
pub use performance::*;
pub use bulk::*;

use chrono::{NaiveDate, Utc};

use crate::domain::{parse_date, Habit, HabitId, UserId};
use crate::engine::EngineError;
use crate::storage::CompletionStore;

/// Resolve the caller's identity from the wire
fn authenticate(user_id: &str) -> Result<UserId, EngineError> {
    UserId::parse(user_id.trim()).map_err(|_| EngineError::Unauthenticated)
}

/// Resolve the target habit, scoped to the caller
fn resolve_habit<S: CompletionStore>(
    store: &S,
    user_id: &UserId,
    habit_id: &str,
) -> Result<Habit, EngineError> {
    let id = HabitId::parse(habit_id.trim()).map_err(|_| EngineError::HabitNotFound {
        habit_id: habit_id.to_string(),
    })?;
    Ok(store.get_habit(user_id, &id)?)
}

/// The engine never reads the clock on its own; `now` comes from the request
/// when supplied, and falls back to today in UTC at the boundary only.
fn resolve_now(now: &Option<String>) -> Result<NaiveDate, EngineError> {
    match now {
        Some(s) => Ok(parse_date(s)?),
        None => Ok(Utc::now().date_naive()),
    }
}
