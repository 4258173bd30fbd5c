/// Operation for period completion-rate rollups

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

use crate::domain::{
    format_date, monthly_performance, weekly_performance, yearly_performance, CompletionEvent,
    DomainError, PeriodBucket,
};
use crate::engine::EngineError;
use crate::ops::{authenticate, resolve_habit, resolve_now};
use crate::storage::CompletionStore;

/// Bucket granularity for a performance request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// 8 ISO weeks
    Week,
    /// 6 calendar months
    Month,
    /// 12 calendar months
    Year,
}

impl Period {
    fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            other => Err(DomainError::UnknownPeriod(other.to_string())),
        }
    }

    fn compute(self, events: &[CompletionEvent], now: NaiveDate) -> Vec<PeriodBucket> {
        match self {
            Period::Week => weekly_performance(events, now),
            Period::Month => monthly_performance(events, now),
            Period::Year => yearly_performance(events, now),
        }
    }
}

/// Parameters for computing period performance
#[derive(Debug, Deserialize)]
pub struct PerformanceParams {
    pub user_id: String,
    pub habit_id: String,
    /// "week", "month", or "year"
    pub period: String,
    /// Evaluation date as yyyy-MM-dd; defaults to today (UTC)
    pub now: Option<String>,
}

/// One bucket on the wire
#[derive(Debug, Serialize)]
pub struct BucketInfo {
    pub period_start: String,
    pub completion_rate: u8,
    pub label: String,
}

/// Response from computing performance
#[derive(Debug, Serialize)]
pub struct PerformanceResponse {
    pub period: Period,
    pub buckets: Vec<BucketInfo>,
}

/// Compute the completion-rate rollup for one habit
pub fn get_performance<S: CompletionStore>(
    store: &S,
    params: PerformanceParams,
) -> Result<PerformanceResponse, EngineError> {
    let user_id = authenticate(&params.user_id)?;
    let habit = resolve_habit(store, &user_id, &params.habit_id)?;
    let period = Period::parse(&params.period)?;
    let now = resolve_now(&params.now)?;

    let events = store.list_completions(&user_id, &habit.id, None)?;
    let buckets = period
        .compute(&events, now)
        .into_iter()
        .map(|b| BucketInfo {
            period_start: format_date(b.period_start),
            completion_rate: b.completion_rate,
            label: b.label,
        })
        .collect();

    Ok(PerformanceResponse { period, buckets })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{parse_date, Habit, UserId};
    use crate::engine::{bulk_complete, BulkPolicy};
    use crate::storage::SqliteStore;

    fn seeded_store(dates: &[&str]) -> (SqliteStore, String, String) {
        let store = SqliteStore::in_memory().unwrap();
        let habit = Habit::new(UserId::new(), "Walk".to_string()).unwrap();
        store.register_habit(&habit).unwrap();

        let parsed: Vec<_> = dates.iter().map(|s| parse_date(s).unwrap()).collect();
        bulk_complete(&store, &habit.user_id, &habit.id, &parsed, BulkPolicy::BestEffort)
            .unwrap();

        (store, habit.user_id.to_string(), habit.id.to_string())
    }

    #[test]
    fn test_weekly_performance_end_to_end() {
        let (store, user_id, habit_id) = seeded_store(&["2024-06-10", "2024-06-11"]);

        let response = get_performance(
            &store,
            PerformanceParams {
                user_id,
                habit_id,
                period: "week".to_string(),
                now: Some("2024-06-12".to_string()),
            },
        )
        .unwrap();

        assert_eq!(response.buckets.len(), 8);
        assert_eq!(response.buckets.last().unwrap().period_start, "2024-06-10");
        // Two of three elapsed days in the current week.
        assert_eq!(response.buckets.last().unwrap().completion_rate, 67);
    }

    #[test]
    fn test_unknown_period_rejected() {
        let (store, user_id, habit_id) = seeded_store(&[]);

        let result = get_performance(
            &store,
            PerformanceParams {
                user_id,
                habit_id,
                period: "quarter".to_string(),
                now: Some("2024-06-12".to_string()),
            },
        );

        assert!(matches!(
            result,
            Err(EngineError::Domain(DomainError::UnknownPeriod(_)))
        ));
    }

    #[test]
    fn test_year_window_size() {
        let (store, user_id, habit_id) = seeded_store(&[]);

        let response = get_performance(
            &store,
            PerformanceParams {
                user_id,
                habit_id,
                period: "year".to_string(),
                now: Some("2024-06-12".to_string()),
            },
        )
        .unwrap();

        assert_eq!(response.buckets.len(), 12);
    }
}
