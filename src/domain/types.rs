/// Identifier newtypes and date wire-format helpers
///
/// Every operation in the engine is scoped to a (UserId, HabitId) pair, and
/// every date that crosses the boundary is a `yyyy-MM-dd` string. The helpers
/// here are the only place that format is parsed or rendered.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::DomainError;

/// Wire format for calendar dates. No timezone offset, whole days only.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Unique identifier for a user
///
/// Wrapper around UUID so a user ID can't be passed where a habit ID is
/// expected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from its string form
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for a habit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HabitId(pub Uuid);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a habit ID from its string form
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl std::fmt::Display for HabitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Parse a boundary date string, strictly.
///
/// Only the exact `yyyy-MM-dd` rendering is accepted; a string that parses but
/// does not round-trip (e.g. `2024-6-1`) is rejected so the wire format stays
/// canonical.
pub fn parse_date(s: &str) -> Result<NaiveDate, DomainError> {
    let date = NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|_| DomainError::MalformedDate(s.to_string()))?;
    if format_date(date) != s {
        return Err(DomainError::MalformedDate(s.to_string()));
    }
    Ok(date)
}

/// Render a date in the boundary format.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
