/// SQLite implementation of the completion store
///
/// Concrete rusqlite-backed store. All queries are scoped by user so a habit
/// owned by someone else looks exactly like a missing habit. The duplicate
/// insert path maps the primary-key violation onto `DuplicateCompletion` so
/// callers can tell a lost race from a real failure.

use std::path::PathBuf;
use rusqlite::{ffi, params, Connection};
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{CompletionEvent, Habit, HabitId, UserId, DATE_FORMAT};
use crate::storage::{migrations, CompletionStore, StorageError};

/// SQLite-based storage implementation
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file and run migrations
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        Self::initialize(conn, Some(&db_path))
    }

    /// Open a fresh in-memory database, mainly for tests
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        Self::initialize(conn, None)
    }

    fn initialize(conn: Connection, db_path: Option<&PathBuf>) -> Result<Self, StorageError> {
        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| StorageError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        migrations::initialize_database(&conn)?;

        match db_path {
            Some(path) => tracing::info!("SQLite store initialized at: {:?}", path),
            None => tracing::debug!("SQLite store initialized in memory"),
        }

        Ok(Self { conn })
    }

    fn parse_timestamp(column: usize, s: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| {
                rusqlite::Error::InvalidColumnType(
                    column,
                    "Invalid datetime".to_string(),
                    rusqlite::types::Type::Text,
                )
            })
    }

    fn parse_date(column: usize, s: &str) -> Result<NaiveDate, rusqlite::Error> {
        NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| {
            rusqlite::Error::InvalidColumnType(
                column,
                "Invalid date".to_string(),
                rusqlite::types::Type::Text,
            )
        })
    }

    fn parse_uuid<T>(
        column: usize,
        s: &str,
        build: impl FnOnce(uuid::Uuid) -> T,
    ) -> Result<T, rusqlite::Error> {
        uuid::Uuid::parse_str(s).map(build).map_err(|_| {
            rusqlite::Error::InvalidColumnType(
                column,
                "Invalid UUID".to_string(),
                rusqlite::types::Type::Text,
            )
        })
    }

    fn row_to_event(row: &rusqlite::Row<'_>) -> Result<CompletionEvent, rusqlite::Error> {
        let user_id_str: String = row.get(0)?;
        let user_id = Self::parse_uuid(0, &user_id_str, UserId)?;

        let habit_id_str: String = row.get(1)?;
        let habit_id = Self::parse_uuid(1, &habit_id_str, HabitId)?;

        let date_str: String = row.get(2)?;
        let date_for = Self::parse_date(2, &date_str)?;

        let value: bool = row.get(3)?;

        let submitted_str: String = row.get(4)?;
        let submitted_at = Self::parse_timestamp(4, &submitted_str)?;

        let updated_str: String = row.get(5)?;
        let updated_at = Self::parse_timestamp(5, &updated_str)?;

        Ok(CompletionEvent::from_existing(
            user_id,
            habit_id,
            date_for,
            value,
            submitted_at,
            updated_at,
        ))
    }
}

impl CompletionStore for SqliteStore {
    /// Register a habit so completions can be recorded against it
    fn register_habit(&self, habit: &Habit) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO habits (id, user_id, name, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                habit.id.to_string(),
                habit.user_id.to_string(),
                habit.name,
                habit.created_at.to_rfc3339(),
            ],
        )?;

        tracing::debug!("Registered habit: {} ({})", habit.name, habit.id);
        Ok(())
    }

    /// Get a habit by ID, scoped to its owner
    fn get_habit(&self, user_id: &UserId, habit_id: &HabitId) -> Result<Habit, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, name, created_at FROM habits
             WHERE id = ?1 AND user_id = ?2",
        )?;

        let result = stmt.query_row(params![habit_id.to_string(), user_id.to_string()], |row| {
            let id_str: String = row.get(0)?;
            let id = Self::parse_uuid(0, &id_str, HabitId)?;

            let user_str: String = row.get(1)?;
            let user = Self::parse_uuid(1, &user_str, UserId)?;

            let created_str: String = row.get(3)?;
            let created_at = Self::parse_timestamp(3, &created_str)?;

            Ok(Habit::from_existing(id, user, row.get(2)?, created_at))
        });

        match result {
            Ok(habit) => Ok(habit),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StorageError::HabitNotFound {
                habit_id: habit_id.to_string(),
            }),
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    /// List completion events for one habit, ordered by date ascending
    fn list_completions(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<CompletionEvent>, StorageError> {
        let base = "SELECT user_id, habit_id, date_for, value, submitted_at, updated_at
                    FROM completion_events
                    WHERE user_id = ?1 AND habit_id = ?2";

        let events = match range {
            Some((start, end)) => {
                let sql = format!("{} AND date_for BETWEEN ?3 AND ?4 ORDER BY date_for ASC", base);
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt.query_map(
                    params![
                        user_id.to_string(),
                        habit_id.to_string(),
                        start.format(DATE_FORMAT).to_string(),
                        end.format(DATE_FORMAT).to_string(),
                    ],
                    Self::row_to_event,
                )?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let sql = format!("{} ORDER BY date_for ASC", base);
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt.query_map(
                    params![user_id.to_string(), habit_id.to_string()],
                    Self::row_to_event,
                )?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };

        Ok(events)
    }

    /// Insert a completion event, enforcing per-date uniqueness
    fn insert_completion(&self, event: &CompletionEvent) -> Result<(), StorageError> {
        let result = self.conn.execute(
            "INSERT INTO completion_events
                (user_id, habit_id, date_for, value, submitted_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                event.user_id.to_string(),
                event.habit_id.to_string(),
                event.date_for.format(DATE_FORMAT).to_string(),
                event.value,
                event.submitted_at.to_rfc3339(),
                event.updated_at.to_rfc3339(),
            ],
        );

        match result {
            Ok(_) => {
                tracing::debug!(
                    "Inserted completion for habit {} on {}",
                    event.habit_id,
                    event.date_for
                );
                Ok(())
            }
            // Only the uniqueness constraint means "already completed".
            // Other constraint failures, like the foreign key when the habit
            // row is gone, are real write failures.
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                    || e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Err(StorageError::DuplicateCompletion {
                    habit_id: event.habit_id.to_string(),
                    date: event.date_for.format(DATE_FORMAT).to_string(),
                })
            }
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    /// Delete the completion event for one date; absent dates are a no-op
    fn delete_completion(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
        date_for: NaiveDate,
    ) -> Result<bool, StorageError> {
        let rows_affected = self.conn.execute(
            "DELETE FROM completion_events
             WHERE user_id = ?1 AND habit_id = ?2 AND date_for = ?3",
            params![
                user_id.to_string(),
                habit_id.to_string(),
                date_for.format(DATE_FORMAT).to_string(),
            ],
        )?;

        if rows_affected > 0 {
            tracing::debug!("Deleted completion for habit {} on {}", habit_id, date_for);
        }

        Ok(rows_affected > 0)
    }
}
