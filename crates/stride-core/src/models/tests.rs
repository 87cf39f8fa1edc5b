#[cfg(test)]
mod model_tests {
    use jiff::{civil::date, Timestamp};

    use crate::models::{
        Habit, HabitFrequency, PostponeReason, Recurrence, RecurrenceRule, RecurrenceUnit,
        SubTask, Task, TaskFilter, TaskState,
    };
    use crate::params::ListTasks;

    fn create_test_subtask(completed: bool) -> SubTask {
        SubTask {
            id: 7,
            task_id: 3,
            title: "Buy soil".to_string(),
            completed_at: completed.then(|| Timestamp::from_second(1641081600).unwrap()),
            sort_order: 0,
            created_at: Timestamp::from_second(1640995200).unwrap(), // 2022-01-01 00:00:00 UTC
            updated_at: Timestamp::from_second(1641081600).unwrap(), // 2022-01-02 00:00:00 UTC
        }
    }

    fn create_test_task() -> Task {
        Task {
            id: 3,
            owner: "ada".to_string(),
            title: "Repot the monstera".to_string(),
            notes: Some("Use the big pot from the garage".to_string()),
            due_on: Some(date(2025, 6, 10)),
            original_due_on: Some(date(2025, 6, 5)),
            recurrence: Recurrence::Weekly,
            auto_postpone: true,
            completed_at: None,
            deleted_at: None,
            created_at: Timestamp::from_second(1640995200).unwrap(),
            updated_at: Timestamp::from_second(1641081600).unwrap(),
            subtasks: vec![create_test_subtask(true), create_test_subtask(false)],
        }
    }

    #[test]
    fn test_task_status_icon() {
        let mut task = create_test_task();
        assert_eq!(task.status_icon(), "○ Open");

        task.completed_at = Some(Timestamp::from_second(1641081600).unwrap());
        assert_eq!(task.status_icon(), "✓ Done");
    }

    #[test]
    fn test_task_is_overdue() {
        let mut task = create_test_task();
        assert!(task.is_overdue(date(2025, 6, 11)));
        assert!(!task.is_overdue(date(2025, 6, 10)));

        task.completed_at = Some(Timestamp::from_second(1641081600).unwrap());
        assert!(!task.is_overdue(date(2025, 6, 11)));

        task.completed_at = None;
        task.due_on = None;
        assert!(!task.is_overdue(date(2025, 6, 11)));
    }

    #[test]
    fn test_task_display() {
        let task = create_test_task();
        let output = format!("{}", task);

        assert!(output.contains("# 3. Repot the monstera"));
        assert!(output.contains("- Status: ○ Open"));
        assert!(output.contains("- Originally due: 2025-06-05"));
        assert!(output.contains("- Repeats: weekly"));
        assert!(output.contains("- Auto-postpone: enabled"));
        assert!(output.contains("Use the big pot from the garage"));
        assert!(output.contains("## Sub-tasks"));
        assert!(output.contains("✓ 7. Buy soil"));
        assert!(output.contains("○ 7. Buy soil"));
    }

    #[test]
    fn test_task_display_omits_empty_sections() {
        let task = Task {
            notes: None,
            original_due_on: None,
            recurrence: Recurrence::None,
            auto_postpone: false,
            subtasks: vec![],
            ..create_test_task()
        };
        let output = format!("{}", task);

        assert!(!output.contains("Originally due"));
        assert!(!output.contains("Repeats"));
        assert!(!output.contains("Auto-postpone"));
        assert!(!output.contains("Sub-tasks"));
    }

    #[test]
    fn test_recurrence_display() {
        assert_eq!(format!("{}", Recurrence::Daily), "daily");
        assert_eq!(format!("{}", Recurrence::None), "none");
        assert_eq!(
            format!(
                "{}",
                Recurrence::Custom(RecurrenceRule {
                    interval: 2,
                    unit: RecurrenceUnit::Weeks,
                })
            ),
            "every 2 weeks"
        );
        assert_eq!(
            format!(
                "{}",
                Recurrence::Custom(RecurrenceRule {
                    interval: 1,
                    unit: RecurrenceUnit::Days,
                })
            ),
            "every day"
        );
    }

    #[test]
    fn test_recurrence_storage_round_trip() {
        let custom = Recurrence::Custom(RecurrenceRule {
            interval: 3,
            unit: RecurrenceUnit::Months,
        });
        let json = custom.rule_json().expect("custom rule serializes");
        assert_eq!(
            Recurrence::from_columns("custom", Some(&json)),
            custom
        );

        assert_eq!(Recurrence::from_columns("weekly", None), Recurrence::Weekly);
        assert!(Recurrence::Daily.rule_json().is_none());
    }

    #[test]
    fn test_recurrence_from_columns_absorbs_malformed_payloads() {
        // Unknown kind reads as non-recurring.
        assert_eq!(
            Recurrence::from_columns("yearly", None),
            Recurrence::None
        );

        // Custom with a broken payload falls back to the one-day default.
        assert_eq!(
            Recurrence::from_columns("custom", Some("not json")),
            Recurrence::Custom(RecurrenceRule::default())
        );
        assert_eq!(
            Recurrence::from_columns("custom", None),
            Recurrence::Custom(RecurrenceRule::default())
        );
    }

    #[test]
    fn test_recurrence_rule_deserialize_defaults() {
        let rule: RecurrenceRule = serde_json::from_str("{}").expect("empty object deserializes");
        assert_eq!(rule.interval, 1);
        assert_eq!(rule.unit, RecurrenceUnit::Days);

        let rule: RecurrenceRule =
            serde_json::from_str(r#"{"interval":4,"unit":"weeks"}"#).expect("full payload");
        assert_eq!(rule.interval, 4);
        assert_eq!(rule.unit, RecurrenceUnit::Weeks);
    }

    #[test]
    fn test_postpone_reason_round_trip() {
        assert_eq!("auto".parse::<PostponeReason>(), Ok(PostponeReason::Auto));
        assert_eq!(
            "manual".parse::<PostponeReason>(),
            Ok(PostponeReason::Manual)
        );
        assert!("other".parse::<PostponeReason>().is_err());
        assert_eq!(PostponeReason::Auto.as_str(), "auto");
    }

    #[test]
    fn test_habit_frequency_round_trip() {
        assert_eq!("daily".parse::<HabitFrequency>(), Ok(HabitFrequency::Daily));
        assert_eq!(
            "WEEKLY".parse::<HabitFrequency>(),
            Ok(HabitFrequency::Weekly)
        );
        assert!("hourly".parse::<HabitFrequency>().is_err());
    }

    #[test]
    fn test_habit_schedule_display() {
        let habit = Habit {
            id: 1,
            owner: "ada".to_string(),
            title: "Strength training".to_string(),
            frequency: HabitFrequency::Weekly,
            weekly_days: [1, 3, 5].into_iter().collect(),
            monthly_dates: Default::default(),
            deleted_at: None,
            created_at: Timestamp::from_second(1640995200).unwrap(),
            updated_at: Timestamp::from_second(1640995200).unwrap(),
        };
        let output = format!("{}", habit);

        assert!(output.contains("# 1. Strength training"));
        assert!(output.contains("- Schedule: weekly on Mon, Wed, Fri"));
    }

    #[test]
    fn test_task_filter_from_list_params() {
        let filter = TaskFilter::from(&ListTasks {
            owner: Some("ada".to_string()),
            ..Default::default()
        });
        assert_eq!(filter.owner, Some("ada".to_string()));
        assert_eq!(filter.state, Some(TaskState::Open));
        assert!(!filter.include_deleted);

        let filter = TaskFilter::from(&ListTasks {
            completed: true,
            ..Default::default()
        });
        assert_eq!(filter.state, Some(TaskState::Completed));

        let filter = TaskFilter::from(&ListTasks {
            all: true,
            completed: true,
            ..Default::default()
        });
        assert_eq!(filter.state, None);
    }

    #[test]
    fn test_overdue_filter_matches_selection_predicate() {
        let filter = TaskFilter::overdue("ada", date(2025, 6, 10));
        assert_eq!(filter.owner, Some("ada".to_string()));
        assert_eq!(filter.due_before, Some(date(2025, 6, 10)));
        assert_eq!(filter.state, Some(TaskState::Open));
        assert!(!filter.include_deleted);
    }
}
