/// Period completion-rate aggregation
///
/// Rolls completion events up into fixed-length windows of calendar buckets:
/// 8 ISO weeks, 6 calendar months, or 12 calendar months, always ending at
/// the period containing `now`. A partially elapsed period is scored against
/// its elapsed days only, so future days never dilute the rate. Buckets come
/// back oldest to newest, ready for direct plotting.

use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::CompletionEvent;

/// Number of week buckets in the weekly view
const WEEKLY_WINDOW: u32 = 8;
/// Number of month buckets in the monthly view
const MONTHLY_WINDOW: u32 = 6;
/// Number of month buckets in the yearly view
const YEARLY_WINDOW: u32 = 12;

/// One calendar bucket with its completion rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBucket {
    /// Start of the period this bucket covers
    pub period_start: NaiveDate,
    /// Integer percentage 0-100 of completed days over elapsed days
    pub completion_rate: u8,
    /// Short calendar label for display
    pub label: String,
}

/// Completion rate per ISO week (Monday start) over the last 8 weeks.
pub fn weekly_performance(events: &[CompletionEvent], now: NaiveDate) -> Vec<PeriodBucket> {
    let completed = completed_dates(events);
    let week_start = now - Duration::days(now.weekday().num_days_from_monday() as i64);

    (0..WEEKLY_WINDOW)
        .rev()
        .map(|offset| {
            let start = week_start - Duration::weeks(offset as i64);
            let end = start + Duration::days(6);
            PeriodBucket {
                period_start: start,
                completion_rate: completion_rate(&completed, start, end, now),
                label: start.format("%b %-d").to_string(),
            }
        })
        .collect()
}

/// Completion rate per calendar month over the last 6 months.
pub fn monthly_performance(events: &[CompletionEvent], now: NaiveDate) -> Vec<PeriodBucket> {
    month_buckets(events, now, MONTHLY_WINDOW, "%b")
}

/// Completion rate per calendar month over the last 12 months.
///
/// Same bucket math as the monthly view with a wider window; labels carry the
/// two-digit year since the window spans a year boundary.
pub fn yearly_performance(events: &[CompletionEvent], now: NaiveDate) -> Vec<PeriodBucket> {
    month_buckets(events, now, YEARLY_WINDOW, "%b %y")
}

fn month_buckets(
    events: &[CompletionEvent],
    now: NaiveDate,
    window: u32,
    label_format: &str,
) -> Vec<PeriodBucket> {
    let completed = completed_dates(events);

    (0..window as i32)
        .rev()
        .map(|offset| {
            let start = month_start_back(now, offset);
            let next_month = month_start_back(now, offset - 1);
            let end = next_month.pred_opt().unwrap_or(start);
            PeriodBucket {
                period_start: start,
                completion_rate: completion_rate(&completed, start, end, now),
                label: start.format(label_format).to_string(),
            }
        })
        .collect()
}

/// First day of the month `offset` months before the month containing
/// `anchor`. A negative offset walks forward.
fn month_start_back(anchor: NaiveDate, offset: i32) -> NaiveDate {
    let months = anchor.year() as i64 * 12 + anchor.month0() as i64 - offset as i64;
    let year = months.div_euclid(12) as i32;
    let month0 = months.rem_euclid(12) as u32;
    NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap_or(anchor)
}

fn completed_dates(events: &[CompletionEvent]) -> HashSet<NaiveDate> {
    events
        .iter()
        .filter(|e| e.value)
        .map(|e| e.date_for)
        .collect()
}

/// Rate over `[start, end]`, clamped to `now`.
///
/// Days after `now` are excluded from the denominator; a period with no
/// elapsed days scores 0.
fn completion_rate(
    completed: &HashSet<NaiveDate>,
    start: NaiveDate,
    end: NaiveDate,
    now: NaiveDate,
) -> u8 {
    let end = end.min(now);
    if end < start {
        return 0;
    }

    let elapsed = (end - start).num_days() + 1;
    let done = start
        .iter_days()
        .take(elapsed as usize)
        .filter(|day| completed.contains(day))
        .count();

    ((done as f64 / elapsed as f64) * 100.0).round() as u8
}
