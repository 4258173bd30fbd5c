/// Integration tests driving the full register -> mutate -> read workflow
use streak_engine::*;
use tempfile::NamedTempFile;

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    fn batch(user_id: &str, habit_id: &str, dates: &[&str]) -> BulkParams {
        BulkParams {
            user_id: user_id.to_string(),
            habit_id: habit_id.to_string(),
            dates: dates.iter().map(|s| s.to_string()).collect(),
            policy: BulkPolicy::default(),
        }
    }

    #[test]
    fn test_full_workflow() {
        let store = SqliteStore::in_memory().expect("Failed to create store");
        let user = UserId::new().to_string();

        let registered = register_habit(
            &store,
            RegisterHabitParams {
                user_id: user.clone(),
                name: "Evening Reading".to_string(),
            },
        )
        .expect("Failed to register habit");
        let habit = registered.habit_id;

        // Complete three consecutive days plus one after a gap.
        let completed = bulk_complete(
            &store,
            batch(&user, &habit, &["2024-06-01", "2024-06-02", "2024-06-03", "2024-06-05"]),
        )
        .expect("Failed to bulk complete");
        assert_eq!(completed.inserted, 4);

        // Streaks reflect the two runs.
        let streaks = get_streaks(
            &store,
            StreaksParams {
                user_id: user.clone(),
                habit_id: habit.clone(),
                now: Some("2024-06-05".to_string()),
            },
        )
        .expect("Failed to compute streaks");
        assert_eq!(streaks.longest_streak, 3);
        assert_eq!(streaks.current_streak, 1);
        assert!(streaks.is_current_streak_active);

        // Weekly performance has 8 buckets ending at the current week.
        let performance = get_performance(
            &store,
            PerformanceParams {
                user_id: user.clone(),
                habit_id: habit.clone(),
                period: "week".to_string(),
                now: Some("2024-06-05".to_string()),
            },
        )
        .expect("Failed to compute performance");
        assert_eq!(performance.buckets.len(), 8);

        // Re-applying the same batch is a no-op.
        let again = bulk_complete(
            &store,
            batch(&user, &habit, &["2024-06-01", "2024-06-02", "2024-06-03", "2024-06-05"]),
        )
        .expect("Failed to bulk complete");
        assert_eq!(again.inserted, 0);
        assert_eq!(again.skipped, 4);

        // Uncomplete everything and confirm the streaks are gone.
        let removed = bulk_uncomplete(
            &store,
            batch(&user, &habit, &["2024-06-01", "2024-06-02", "2024-06-03", "2024-06-05"]),
        )
        .expect("Failed to bulk uncomplete");
        assert_eq!(removed.deleted, 4);

        let empty = get_streaks(
            &store,
            StreaksParams {
                user_id: user,
                habit_id: habit,
                now: Some("2024-06-05".to_string()),
            },
        )
        .expect("Failed to compute streaks");
        assert_eq!(empty.longest_streak, 0);
        assert!(!empty.is_current_streak_active);
    }

    #[test]
    fn test_database_persistence() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();

        let user = UserId::new().to_string();
        let habit_id;
        {
            let store = SqliteStore::new(db_path.clone()).expect("Failed to create store");
            let registered = register_habit(
                &store,
                RegisterHabitParams {
                    user_id: user.clone(),
                    name: "Persisted".to_string(),
                },
            )
            .expect("Failed to register habit");
            habit_id = registered.habit_id;

            bulk_complete(&store, batch(&user, &habit_id, &["2024-06-04", "2024-06-05"]))
                .expect("Failed to bulk complete");
        }

        // Reopen the same file; history must survive.
        let store = SqliteStore::new(db_path).expect("Failed to reopen store");
        let streaks = get_streaks(
            &store,
            StreaksParams {
                user_id: user,
                habit_id,
                now: Some("2024-06-05".to_string()),
            },
        )
        .expect("Failed to compute streaks");

        assert_eq!(streaks.current_streak, 2);
    }

    #[test]
    fn test_storage_interface() {
        let store = SqliteStore::in_memory().expect("Failed to create store");

        // SqliteStore implements the CompletionStore trait.
        let _: &dyn CompletionStore = &store;
    }
}
