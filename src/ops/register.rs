/// Operation for registering a habit
///
/// Habit management beyond this is out of scope; registration exists so
/// completions have a scoped owner to attach to.

use serde::{Deserialize, Serialize};

use crate::domain::Habit;
use crate::engine::EngineError;
use crate::ops::authenticate;
use crate::storage::CompletionStore;

/// Parameters for registering a habit
#[derive(Debug, Deserialize)]
pub struct RegisterHabitParams {
    pub user_id: String,
    pub name: String,
}

/// Response from registering a habit
#[derive(Debug, Serialize)]
pub struct RegisterHabitResponse {
    pub habit_id: String,
    pub name: String,
}

/// Register a new habit for the caller
pub fn register_habit<S: CompletionStore>(
    store: &S,
    params: RegisterHabitParams,
) -> Result<RegisterHabitResponse, EngineError> {
    let user_id = authenticate(&params.user_id)?;

    let habit = Habit::new(user_id, params.name)?;
    store.register_habit(&habit)?;

    tracing::info!("Registered habit {} ({})", habit.name, habit.id);

    Ok(RegisterHabitResponse {
        habit_id: habit.id.to_string(),
        name: habit.name,
    })
}
