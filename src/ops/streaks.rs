/// Operation for computing a habit's streaks
///
/// Loads the habit's full completion history in one read and hands it to the
/// streak calculator. `now` is optional on the wire so clients in any
/// timezone convention can pin the evaluation date; tests always pin it.

use serde::{Deserialize, Serialize};

use crate::domain::{compute_streaks, format_date, Streak};
use crate::engine::EngineError;
use crate::ops::{authenticate, resolve_habit, resolve_now};
use crate::storage::CompletionStore;

/// Parameters for computing streaks
#[derive(Debug, Deserialize)]
pub struct StreaksParams {
    pub user_id: String,
    pub habit_id: String,
    /// Evaluation date as yyyy-MM-dd; defaults to today (UTC)
    pub now: Option<String>,
}

/// One run on the wire, dates in yyyy-MM-dd form
#[derive(Debug, Serialize)]
pub struct StreakInfo {
    pub length: u32,
    pub start_date: String,
    pub end_date: String,
    pub is_current_streak: bool,
}

impl From<Streak> for StreakInfo {
    fn from(streak: Streak) -> Self {
        Self {
            length: streak.length,
            start_date: format_date(streak.start_date),
            end_date: format_date(streak.end_date),
            is_current_streak: streak.is_current_streak,
        }
    }
}

/// Response from computing streaks
#[derive(Debug, Serialize)]
pub struct StreaksResponse {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub is_current_streak_active: bool,
    pub top_streaks: Vec<StreakInfo>,
}

/// Compute streak statistics for one habit
pub fn get_streaks<S: CompletionStore>(
    store: &S,
    params: StreaksParams,
) -> Result<StreaksResponse, EngineError> {
    let user_id = authenticate(&params.user_id)?;
    let habit = resolve_habit(store, &user_id, &params.habit_id)?;
    let now = resolve_now(&params.now)?;

    let events = store.list_completions(&user_id, &habit.id, None)?;
    let summary = compute_streaks(&events, now);

    Ok(StreaksResponse {
        current_streak: summary.current_streak,
        longest_streak: summary.longest_streak,
        is_current_streak_active: summary.is_current_streak_active,
        top_streaks: summary.top_streaks.into_iter().map(StreakInfo::from).collect(),
    })
}
