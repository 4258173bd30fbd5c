/// Streak detection over completion events
///
/// A run is a maximal sequence of calendar-consecutive completion dates.
/// This module walks a habit's events once and derives the full run history,
/// the current streak, and the longest streak. Liveness of the most recent
/// run is judged against a caller-supplied `now` so results are deterministic
/// and testable; "now" is never recomputed internally.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

use crate::domain::CompletionEvent;

/// How many top runs are reported in a summary
const TOP_STREAKS: usize = 5;

/// One maximal run of consecutive completion dates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    /// Count of consecutive calendar days in the run
    pub length: u32,
    /// First date of the run, inclusive
    pub start_date: NaiveDate,
    /// Last date of the run, inclusive
    pub end_date: NaiveDate,
    /// True only for the most recent run, and only while it is still live
    pub is_current_streak: bool,
}

impl Streak {
    fn closed(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            length: ((end_date - start_date).num_days() + 1) as u32,
            start_date,
            end_date,
            is_current_streak: false,
        }
    }
}

/// Derived streak statistics for one habit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    /// Length of the most recent run if it is still live, else 0
    pub current_streak: u32,
    /// Longest run over all history, independent of liveness
    pub longest_streak: u32,
    /// The longest runs, longest first, ties broken by more recent end date
    pub top_streaks: Vec<Streak>,
    /// Whether the most recent run still counts as ongoing
    pub is_current_streak_active: bool,
}

impl StreakSummary {
    fn empty() -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            top_streaks: Vec::new(),
            is_current_streak_active: false,
        }
    }
}

/// Calculate streak statistics from a habit's completion events.
///
/// Only events with a truthy value contribute; an explicit false value never
/// extends a run. Ordering of the input does not matter.
///
/// The most recent run is live when its last date is `now` or `now - 1 day`,
/// i.e. the user has not yet missed two consecutive days. `now` comes from
/// the caller, never the clock.
pub fn compute_streaks(events: &[CompletionEvent], now: NaiveDate) -> StreakSummary {
    let dates: Vec<NaiveDate> = events
        .iter()
        .filter(|e| e.value)
        .map(|e| e.date_for)
        .collect();
    streaks_from_dates(&dates, now)
}

/// Streak statistics from bare completion dates.
///
/// Duplicates are tolerated (the store's uniqueness invariant should prevent
/// them, but a stray duplicate must not inflate a run).
pub fn streaks_from_dates(dates: &[NaiveDate], now: NaiveDate) -> StreakSummary {
    let mut sorted: Vec<NaiveDate> = dates.to_vec();
    sorted.sort();
    sorted.dedup();

    if sorted.is_empty() {
        return StreakSummary::empty();
    }

    // Single forward walk: a gap of exactly 1 day extends the open run,
    // anything larger closes it.
    let mut runs: Vec<Streak> = Vec::new();
    let mut run_start = sorted[0];
    let mut prev = sorted[0];

    for &date in &sorted[1..] {
        if (date - prev).num_days() == 1 {
            prev = date;
        } else {
            runs.push(Streak::closed(run_start, prev));
            run_start = date;
            prev = date;
        }
    }
    runs.push(Streak::closed(run_start, prev));

    let last_completed = prev;
    let days_since_last = (now - last_completed).num_days();
    let is_active = (0..=1).contains(&days_since_last);

    let current_streak = if is_active {
        runs.last().map(|r| r.length).unwrap_or(0)
    } else {
        0
    };
    let longest_streak = runs.iter().map(|r| r.length).max().unwrap_or(0);

    if is_active {
        if let Some(last_run) = runs.last_mut() {
            last_run.is_current_streak = true;
        }
    }

    let mut top_streaks = runs;
    top_streaks.sort_by(|a, b| {
        b.length
            .cmp(&a.length)
            .then_with(|| b.end_date.cmp(&a.end_date))
    });
    top_streaks.truncate(TOP_STREAKS);

    StreakSummary {
        current_streak,
        longest_streak,
        top_streaks,
        is_current_streak_active: is_active,
    }
}
