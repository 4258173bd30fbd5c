/// Operations for bulk completion and un-completion
///
/// Date parsing is strict and all-or-nothing: one malformed date rejects the
/// whole call before any write happens, so a batch never partially applies
/// because of bad input. Store failures mid-batch are governed by the
/// caller's `BulkPolicy`.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

use crate::domain::parse_date;
use crate::engine::{self, BulkPolicy, EngineError};
use crate::ops::{authenticate, resolve_habit};
use crate::storage::CompletionStore;

/// Parameters shared by both bulk operations
#[derive(Debug, Deserialize)]
pub struct BulkParams {
    pub user_id: String,
    pub habit_id: String,
    /// Target dates as yyyy-MM-dd strings
    pub dates: Vec<String>,
    /// Failure policy; defaults to best-effort
    #[serde(default)]
    pub policy: BulkPolicy,
}

/// Response from a bulk-complete call
#[derive(Debug, Serialize)]
pub struct BulkCompleteResponse {
    pub inserted: u32,
    pub skipped: u32,
    pub failed: u32,
}

/// Response from a bulk-uncomplete call
#[derive(Debug, Serialize)]
pub struct BulkUncompleteResponse {
    pub deleted: u32,
    pub skipped: u32,
    pub failed: u32,
}

/// Mark a batch of dates completed
pub fn bulk_complete<S: CompletionStore>(
    store: &S,
    params: BulkParams,
) -> Result<BulkCompleteResponse, EngineError> {
    let (user_id, habit_id, dates, policy) = resolve(store, params)?;

    let outcome = engine::bulk_complete(store, &user_id, &habit_id, &dates, policy)?;

    Ok(BulkCompleteResponse {
        inserted: outcome.inserted,
        skipped: outcome.skipped,
        failed: outcome.failed,
    })
}

/// Remove completions for a batch of dates
pub fn bulk_uncomplete<S: CompletionStore>(
    store: &S,
    params: BulkParams,
) -> Result<BulkUncompleteResponse, EngineError> {
    let (user_id, habit_id, dates, policy) = resolve(store, params)?;

    let outcome = engine::bulk_uncomplete(store, &user_id, &habit_id, &dates, policy)?;

    Ok(BulkUncompleteResponse {
        deleted: outcome.deleted,
        skipped: outcome.skipped,
        failed: outcome.failed,
    })
}

type ResolvedBulk = (
    crate::domain::UserId,
    crate::domain::HabitId,
    Vec<NaiveDate>,
    BulkPolicy,
);

fn resolve<S: CompletionStore>(store: &S, params: BulkParams) -> Result<ResolvedBulk, EngineError> {
    let user_id = authenticate(&params.user_id)?;

    // Parse the entire batch before touching the habit or the store.
    let dates = params
        .dates
        .iter()
        .map(|s| parse_date(s))
        .collect::<Result<Vec<_>, _>>()?;

    let habit = resolve_habit(store, &user_id, &params.habit_id)?;

    Ok((user_id, habit.id, dates, params.policy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Habit, UserId};
    use crate::storage::SqliteStore;

    fn store_with_habit() -> (SqliteStore, String, String) {
        let store = SqliteStore::in_memory().unwrap();
        let habit = Habit::new(UserId::new(), "Hydrate".to_string()).unwrap();
        store.register_habit(&habit).unwrap();
        (store, habit.user_id.to_string(), habit.id.to_string())
    }

    fn batch(user_id: &str, habit_id: &str, dates: &[&str]) -> BulkParams {
        BulkParams {
            user_id: user_id.to_string(),
            habit_id: habit_id.to_string(),
            dates: dates.iter().map(|s| s.to_string()).collect(),
            policy: BulkPolicy::default(),
        }
    }

    #[test]
    fn test_complete_then_uncomplete_round_trip() {
        let (store, user_id, habit_id) = store_with_habit();
        let dates = ["2024-06-01", "2024-06-02", "2024-06-03"];

        let completed =
            bulk_complete(&store, batch(&user_id, &habit_id, &dates)).unwrap();
        assert_eq!(completed.inserted, 3);

        let uncompleted =
            bulk_uncomplete(&store, batch(&user_id, &habit_id, &dates)).unwrap();
        assert_eq!(uncompleted.deleted, 3);
        assert_eq!(uncompleted.skipped, 0);
    }

    #[test]
    fn test_malformed_date_rejects_whole_call() {
        let (store, user_id, habit_id) = store_with_habit();

        let result = bulk_complete(
            &store,
            batch(&user_id, &habit_id, &["2024-06-01", "06/02/2024"]),
        );
        assert!(matches!(result, Err(EngineError::Domain(_))));

        // Nothing was written, including the well-formed date.
        let check = bulk_complete(&store, batch(&user_id, &habit_id, &["2024-06-01"])).unwrap();
        assert_eq!(check.inserted, 1);
    }

    #[test]
    fn test_unauthenticated_rejected_first() {
        let (store, _, habit_id) = store_with_habit();

        let result = bulk_complete(&store, batch("", &habit_id, &["2024-06-01"]));
        assert!(matches!(result, Err(EngineError::Unauthenticated)));
    }

    #[test]
    fn test_foreign_habit_rejected_before_mutation() {
        let (store, _, habit_id) = store_with_habit();
        let stranger = UserId::new().to_string();

        let result = bulk_complete(&store, batch(&stranger, &habit_id, &["2024-06-01"]));
        assert!(matches!(result, Err(EngineError::HabitNotFound { .. })));
    }
}
