/// Unit tests exercising the public library surface
use streak_engine::*;
use chrono::NaiveDate;
use tempfile::NamedTempFile;

fn d(s: &str) -> NaiveDate {
    parse_date(s).unwrap()
}

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    #[test]
    fn test_habit_creation() {
        let habit = Habit::new(UserId::new(), "Test Habit".to_string());

        assert!(habit.is_ok());
        assert_eq!(habit.unwrap().name, "Test Habit");
    }

    #[test]
    fn test_completion_event_creation() {
        let habit_id = HabitId::new();
        let event = CompletionEvent::new(UserId::new(), habit_id.clone(), d("2024-06-05"));

        assert_eq!(event.habit_id, habit_id);
        assert_eq!(event.date_for, d("2024-06-05"));
        assert!(event.value);
    }

    #[test]
    fn test_streak_summary_from_public_api() {
        let summary = streaks_from_dates(
            &[d("2024-06-01"), d("2024-06-02"), d("2024-06-03"), d("2024-06-05")],
            d("2024-06-05"),
        );

        assert_eq!(summary.longest_streak, 3);
        assert_eq!(summary.current_streak, 1);
        assert!(summary.is_current_streak_active);
    }

    #[test]
    fn test_performance_windows() {
        let now = d("2024-06-12");
        assert_eq!(weekly_performance(&[], now).len(), 8);
        assert_eq!(monthly_performance(&[], now).len(), 6);
        assert_eq!(yearly_performance(&[], now).len(), 12);
    }

    #[test]
    fn test_storage_creation_on_disk() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let store = SqliteStore::new(temp_file.path().to_path_buf());
        assert!(store.is_ok());
    }

    #[test]
    fn test_server_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let server = StreakServer::new(temp_file.path().to_path_buf());
        assert!(server.is_ok());
    }

    #[test]
    fn test_date_wire_format() {
        assert!(parse_date("2024-06-05").is_ok());
        assert!(parse_date("2024-6-5").is_err());
        assert_eq!(format_date(d("2024-06-05")), "2024-06-05");
    }
}
