/// Domain module containing the data model and the pure computation layer
///
/// This module defines the core entities (Habit, CompletionEvent) and the two
/// derived-value calculators: streak detection and period completion-rate
/// aggregation. Everything here is a pure function over an in-memory snapshot
/// of events; nothing touches the store.

pub mod habit;
pub mod event;
pub mod streak;
pub mod performance;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use event::*;
pub use streak::*;
pub use performance::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Malformed date (expected yyyy-MM-dd): {0}")]
    MalformedDate(String),

    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Unknown period: {0} (expected week, month, or year)")]
    UnknownPeriod(String),
}
