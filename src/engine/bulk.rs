/// Bulk mutation coordinator
///
/// Applies a batch of target dates against a habit's existing completions
/// with diff-before-write semantics: one read of the current state, then only
/// the inserts or deletes that are actually needed. Re-applying the same
/// batch is a no-op, so both operations are idempotent.
///
/// The store remains the enforcer of per-date uniqueness; when a concurrent
/// writer wins the race for a date, the resulting duplicate rejection is
/// downgraded to a skip rather than a failure.

use std::collections::BTreeSet;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{CompletionEvent, HabitId, UserId};
use crate::engine::EngineError;
use crate::storage::{CompletionStore, StorageError};

/// How a batch reacts to an individual write failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkPolicy {
    /// Keep going: failed dates are counted and logged, the rest of the
    /// batch still applies
    #[default]
    BestEffort,
    /// Abort the call on the first store failure
    FailFast,
}

/// Outcome of a bulk-complete call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkCompleteOutcome {
    /// Records actually created
    pub inserted: u32,
    /// Dates that were already completed
    pub skipped: u32,
    /// Dates whose insert failed (best-effort policy only)
    pub failed: u32,
}

/// Outcome of a bulk-uncomplete call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUncompleteOutcome {
    /// Records actually removed
    pub deleted: u32,
    /// Dates that had no completion to remove
    pub skipped: u32,
    /// Dates whose delete failed (best-effort policy only)
    pub failed: u32,
}

/// Mark every date in `dates` as completed for the habit.
///
/// Dates already completed are skipped, never duplicated. Counts reflect only
/// writes that actually committed.
pub fn bulk_complete<S: CompletionStore>(
    store: &S,
    user_id: &UserId,
    habit_id: &HabitId,
    dates: &[NaiveDate],
    policy: BulkPolicy,
) -> Result<BulkCompleteOutcome, EngineError> {
    let requested: BTreeSet<NaiveDate> = dates.iter().copied().collect();
    let existing = existing_dates(store, user_id, habit_id)?;

    let mut outcome = BulkCompleteOutcome {
        inserted: 0,
        skipped: (requested.intersection(&existing).count()) as u32,
        failed: 0,
    };

    for &date in requested.difference(&existing) {
        let event = CompletionEvent::new(user_id.clone(), habit_id.clone(), date);
        match store.insert_completion(&event) {
            Ok(()) => outcome.inserted += 1,
            // A concurrent writer completed this date between our read and
            // this insert; the date is completed either way.
            Err(StorageError::DuplicateCompletion { .. }) => outcome.skipped += 1,
            Err(e) => match policy {
                BulkPolicy::FailFast => return Err(e.into()),
                BulkPolicy::BestEffort => {
                    tracing::warn!("Insert failed for {} on {}: {}", habit_id, date, e);
                    outcome.failed += 1;
                }
            },
        }
    }

    tracing::debug!(
        "Bulk complete for habit {}: {} inserted, {} skipped, {} failed",
        habit_id,
        outcome.inserted,
        outcome.skipped,
        outcome.failed
    );
    Ok(outcome)
}

/// Remove the completion for every date in `dates`.
///
/// Dates with no existing completion are skipped; there is nothing to delete.
pub fn bulk_uncomplete<S: CompletionStore>(
    store: &S,
    user_id: &UserId,
    habit_id: &HabitId,
    dates: &[NaiveDate],
    policy: BulkPolicy,
) -> Result<BulkUncompleteOutcome, EngineError> {
    let requested: BTreeSet<NaiveDate> = dates.iter().copied().collect();
    let existing = existing_dates(store, user_id, habit_id)?;

    let mut outcome = BulkUncompleteOutcome {
        deleted: 0,
        skipped: (requested.difference(&existing).count()) as u32,
        failed: 0,
    };

    for &date in requested.intersection(&existing) {
        match store.delete_completion(user_id, habit_id, date) {
            Ok(true) => outcome.deleted += 1,
            // A concurrent caller deleted this date between our read and this
            // delete; the date is uncompleted either way.
            Ok(false) => outcome.skipped += 1,
            Err(e) => match policy {
                BulkPolicy::FailFast => return Err(e.into()),
                BulkPolicy::BestEffort => {
                    tracing::warn!("Delete failed for {} on {}: {}", habit_id, date, e);
                    outcome.failed += 1;
                }
            },
        }
    }

    tracing::debug!(
        "Bulk uncomplete for habit {}: {} deleted, {} skipped, {} failed",
        habit_id,
        outcome.deleted,
        outcome.skipped,
        outcome.failed
    );
    Ok(outcome)
}

fn existing_dates<S: CompletionStore>(
    store: &S,
    user_id: &UserId,
    habit_id: &HabitId,
) -> Result<BTreeSet<NaiveDate>, EngineError> {
    let events = store.list_completions(user_id, habit_id, None)?;
    Ok(events.into_iter().map(|e| e.date_for).collect())
}
