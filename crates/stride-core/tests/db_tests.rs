use jiff::civil::date;
use stride_core::{
    Database, HabitFrequency, PostponeReason, Recurrence, RecurrenceRule, RecurrenceUnit,
    TaskFilter, TaskState, TrackerError,
};
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

#[test]
fn test_database_initialization() {
    let (_temp_file, _db) = create_test_db();

    // Database should be initialized and ready to use
    assert!(_temp_file.path().exists());
}

#[test]
fn test_create_and_get_task() {
    let (_temp_file, mut db) = create_test_db();

    let task = db
        .create_task(
            "ada",
            "Water the plants",
            Some("The ones on the balcony"),
            Some(date(2025, 6, 2)),
            &Recurrence::Weekly,
            true,
        )
        .expect("Failed to create task");

    assert!(task.id > 0);
    assert_eq!(task.owner, "ada");
    assert_eq!(task.due_on, Some(date(2025, 6, 2)));
    assert_eq!(task.original_due_on, None);
    assert!(task.auto_postpone);
    assert!(!task.is_completed());

    let retrieved = db
        .get_task(task.id, false)
        .expect("Failed to get task")
        .expect("Task should exist");
    assert_eq!(retrieved.title, "Water the plants");
    assert_eq!(retrieved.recurrence, Recurrence::Weekly);
    assert!(retrieved.subtasks.is_empty());
}

#[test]
fn test_custom_recurrence_survives_storage() {
    let (_temp_file, mut db) = create_test_db();

    let rule = Recurrence::Custom(RecurrenceRule {
        interval: 2,
        unit: RecurrenceUnit::Weeks,
    });
    let task = db
        .create_task("ada", "Deep clean", None, Some(date(2025, 1, 1)), &rule, false)
        .expect("Failed to create task");

    let retrieved = db
        .get_task(task.id, false)
        .expect("Failed to get task")
        .expect("Task should exist");
    assert_eq!(retrieved.recurrence, rule);
}

#[test]
fn test_add_subtask_dense_ordering() {
    let (_temp_file, mut db) = create_test_db();

    let task = db
        .create_task("ada", "Pack for the trip", None, None, &Recurrence::None, false)
        .expect("Failed to create task");

    let first = db
        .add_subtask(task.id, "Clothes")
        .expect("Failed to add sub-task");
    let second = db
        .add_subtask(task.id, "Chargers")
        .expect("Failed to add sub-task");
    let third = db
        .add_subtask(task.id, "Passport")
        .expect("Failed to add sub-task");

    assert_eq!(first.sort_order, 0);
    assert_eq!(second.sort_order, 1);
    assert_eq!(third.sort_order, 2);

    let subtasks = db.get_subtasks(task.id).expect("Failed to get sub-tasks");
    assert_eq!(subtasks.len(), 3);
    assert_eq!(subtasks[0].title, "Clothes");
    assert_eq!(subtasks[2].title, "Passport");
}

#[test]
fn test_add_subtask_to_missing_task_errors() {
    let (_temp_file, mut db) = create_test_db();

    let result = db.add_subtask(999, "Orphan");
    assert!(matches!(
        result,
        Err(TrackerError::TaskNotFound { id: 999 })
    ));
}

#[test]
fn test_update_task_preserves_unset_fields() {
    let (_temp_file, mut db) = create_test_db();

    let task = db
        .create_task(
            "ada",
            "Draft the report",
            Some("First pass only"),
            Some(date(2025, 6, 5)),
            &Recurrence::None,
            false,
        )
        .expect("Failed to create task");

    db.update_task(
        task.id,
        stride_core::UpdateTaskRequest {
            due_on: Some(date(2025, 6, 12)),
            auto_postpone: Some(true),
            ..Default::default()
        },
    )
    .expect("Failed to update task");

    let updated = db
        .get_task(task.id, false)
        .expect("Failed to get task")
        .expect("Task should exist");
    assert_eq!(updated.title, "Draft the report");
    assert_eq!(updated.notes.as_deref(), Some("First pass only"));
    assert_eq!(updated.due_on, Some(date(2025, 6, 12)));
    assert!(updated.auto_postpone);

    // An empty request is a quiet no-op; a missing task is an error.
    db.update_task(task.id, Default::default())
        .expect("Empty update should succeed");
    let result = db.update_task(
        999,
        stride_core::UpdateTaskRequest {
            title: Some("Ghost".to_string()),
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(TrackerError::TaskNotFound { id: 999 })));
}

#[test]
fn test_complete_task_transitions_once() {
    let (_temp_file, mut db) = create_test_db();

    let task = db
        .create_task("ada", "One-shot", None, None, &Recurrence::None, false)
        .expect("Failed to create task");

    let completed = db
        .complete_task(task.id)
        .expect("Failed to complete task")
        .expect("First completion should transition");
    assert!(completed.is_completed());

    // Already completed: the conditional update matches nothing.
    let again = db.complete_task(task.id).expect("Failed to complete task");
    assert!(again.is_none());

    // Missing tasks are also a quiet no-op.
    let missing = db.complete_task(999).expect("Failed to complete task");
    assert!(missing.is_none());
}

#[test]
fn test_complete_subtask() {
    let (_temp_file, mut db) = create_test_db();

    let task = db
        .create_task("ada", "Parent", None, None, &Recurrence::None, false)
        .expect("Failed to create task");
    let subtask = db
        .add_subtask(task.id, "Child")
        .expect("Failed to add sub-task");

    assert!(db
        .complete_subtask(subtask.id)
        .expect("Failed to complete sub-task"));
    assert!(!db
        .complete_subtask(subtask.id)
        .expect("Failed to complete sub-task"));

    let result = db.complete_subtask(999);
    assert!(matches!(
        result,
        Err(TrackerError::SubTaskNotFound { id: 999 })
    ));
}

#[test]
fn test_spawn_next_occurrence_weekly() {
    let (_temp_file, mut db) = create_test_db();

    // 2025-06-02 is a Monday.
    let task = db
        .create_task(
            "ada",
            "Weekly review",
            Some("Look at the calendar"),
            Some(date(2025, 6, 2)),
            &Recurrence::Weekly,
            true,
        )
        .expect("Failed to create task");
    db.add_subtask(task.id, "Inbox zero")
        .expect("Failed to add sub-task");
    db.add_subtask(task.id, "Plan the week")
        .expect("Failed to add sub-task");

    db.complete_task(task.id)
        .expect("Failed to complete task")
        .expect("Task should transition");

    let next = db
        .spawn_next_occurrence(task.id)
        .expect("Failed to spawn next occurrence")
        .expect("Weekly task should recur");

    assert_ne!(next.id, task.id);
    assert_eq!(next.due_on, Some(date(2025, 6, 9)));
    assert_eq!(next.original_due_on, None);
    assert!(!next.is_completed());
    assert_eq!(next.recurrence, Recurrence::Weekly);
    assert!(next.auto_postpone);
    assert_eq!(next.notes.as_deref(), Some("Look at the calendar"));
    assert_eq!(next.subtasks.len(), 2);
    assert_eq!(next.subtasks[0].title, "Inbox zero");
    assert_eq!(next.subtasks[0].sort_order, 0);
    assert_eq!(next.subtasks[1].sort_order, 1);
    assert!(next.subtasks.iter().all(|s| !s.is_completed()));

    // The source instance is untouched beyond its completion mark.
    let source = db
        .get_task(task.id, false)
        .expect("Failed to get task")
        .expect("Task should exist");
    assert_eq!(source.due_on, Some(date(2025, 6, 2)));
    assert!(source.is_completed());
}

#[test]
fn test_spawn_next_occurrence_custom_interval() {
    let (_temp_file, mut db) = create_test_db();

    let rule = Recurrence::Custom(RecurrenceRule {
        interval: 2,
        unit: RecurrenceUnit::Weeks,
    });
    let task = db
        .create_task("ada", "Biweekly sync", None, Some(date(2025, 1, 1)), &rule, false)
        .expect("Failed to create task");

    let next = db
        .spawn_next_occurrence(task.id)
        .expect("Failed to spawn next occurrence")
        .expect("Custom task should recur");
    assert_eq!(next.due_on, Some(date(2025, 1, 15)));
}

#[test]
fn test_spawn_next_occurrence_noop_conditions() {
    let (_temp_file, mut db) = create_test_db();

    // Non-recurring task.
    let one_shot = db
        .create_task("ada", "One-shot", None, Some(date(2025, 6, 2)), &Recurrence::None, false)
        .expect("Failed to create task");
    assert!(db
        .spawn_next_occurrence(one_shot.id)
        .expect("Failed to spawn")
        .is_none());

    // Recurring but undated task.
    let undated = db
        .create_task("ada", "Undated", None, None, &Recurrence::Daily, false)
        .expect("Failed to create task");
    assert!(db
        .spawn_next_occurrence(undated.id)
        .expect("Failed to spawn")
        .is_none());

    // Missing task.
    assert!(db.spawn_next_occurrence(999).expect("Failed to spawn").is_none());
}

#[test]
fn test_spawn_next_occurrence_sibling_guard() {
    let (_temp_file, mut db) = create_test_db();

    let task = db
        .create_task("ada", "Daily standup", None, Some(date(2025, 6, 2)), &Recurrence::Daily, false)
        .expect("Failed to create task");

    let first = db
        .spawn_next_occurrence(task.id)
        .expect("Failed to spawn next occurrence");
    assert!(first.is_some());

    // The open sibling created above blocks a duplicate.
    let second = db
        .spawn_next_occurrence(task.id)
        .expect("Failed to spawn next occurrence");
    assert!(second.is_none());
}

#[test]
fn test_auto_postpone_moves_overdue_task() {
    let (_temp_file, mut db) = create_test_db();

    let task = db
        .create_task(
            "ada",
            "Call the dentist",
            None,
            Some(date(2025, 6, 5)),
            &Recurrence::None,
            true,
        )
        .expect("Failed to create task");

    let outcome = db
        .auto_postpone_overdue("ada", date(2025, 6, 10))
        .expect("Failed to run auto-postpone");
    assert_eq!(outcome.postponed_count, 1);
    assert_eq!(outcome.postponed_task_ids, vec![task.id]);
    assert_eq!(outcome.as_of, date(2025, 6, 10));

    let moved = db
        .get_task(task.id, false)
        .expect("Failed to get task")
        .expect("Task should exist");
    assert_eq!(moved.due_on, Some(date(2025, 6, 10)));
    assert_eq!(moved.original_due_on, Some(date(2025, 6, 5)));

    let history = db
        .postpone_history(task.id)
        .expect("Failed to get history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].from_date, date(2025, 6, 5));
    assert_eq!(history[0].to_date, date(2025, 6, 10));
    assert_eq!(history[0].reason, PostponeReason::Auto);
}

#[test]
fn test_auto_postpone_second_run_selects_nothing() {
    let (_temp_file, mut db) = create_test_db();

    db.create_task(
        "ada",
        "Call the dentist",
        None,
        Some(date(2025, 6, 5)),
        &Recurrence::None,
        true,
    )
    .expect("Failed to create task");

    let first = db
        .auto_postpone_overdue("ada", date(2025, 6, 10))
        .expect("Failed to run auto-postpone");
    assert_eq!(first.postponed_count, 1);

    let second = db
        .auto_postpone_overdue("ada", date(2025, 6, 10))
        .expect("Failed to run auto-postpone");
    assert_eq!(second.postponed_count, 0);
    assert!(second.postponed_task_ids.is_empty());
}

#[test]
fn test_auto_postpone_selection_predicate() {
    let (_temp_file, mut db) = create_test_db();

    // Overdue but not flagged.
    db.create_task("ada", "Unflagged", None, Some(date(2025, 6, 1)), &Recurrence::None, false)
        .expect("Failed to create task");

    // Flagged but due in the future.
    db.create_task("ada", "Future", None, Some(date(2025, 6, 20)), &Recurrence::None, true)
        .expect("Failed to create task");

    // Flagged and overdue, but completed.
    let done = db
        .create_task("ada", "Done", None, Some(date(2025, 6, 1)), &Recurrence::None, true)
        .expect("Failed to create task");
    db.complete_task(done.id)
        .expect("Failed to complete task")
        .expect("Task should transition");

    // Flagged and overdue, but deleted.
    let deleted = db
        .create_task("ada", "Deleted", None, Some(date(2025, 6, 1)), &Recurrence::None, true)
        .expect("Failed to create task");
    db.soft_delete_task(deleted.id)
        .expect("Failed to delete task");

    // Flagged and overdue, but someone else's.
    db.create_task("grace", "Other owner", None, Some(date(2025, 6, 1)), &Recurrence::None, true)
        .expect("Failed to create task");

    let outcome = db
        .auto_postpone_overdue("ada", date(2025, 6, 10))
        .expect("Failed to run auto-postpone");
    assert_eq!(outcome.postponed_count, 0);
}

#[test]
fn test_manual_postpone_requires_due_date() {
    let (_temp_file, mut db) = create_test_db();

    let undated = db
        .create_task("ada", "Undated", None, None, &Recurrence::None, false)
        .expect("Failed to create task");

    let result = db.postpone_task(undated.id, date(2025, 6, 10), PostponeReason::Manual);
    assert!(matches!(result, Err(TrackerError::InvalidInput { .. })));

    let result = db.postpone_task(999, date(2025, 6, 10), PostponeReason::Manual);
    assert!(matches!(result, Err(TrackerError::TaskNotFound { id: 999 })));
}

#[test]
fn test_list_tasks_filtering() {
    let (_temp_file, mut db) = create_test_db();

    let open = db
        .create_task("ada", "Open task", None, Some(date(2025, 6, 5)), &Recurrence::None, false)
        .expect("Failed to create task");
    let done = db
        .create_task("ada", "Done task", None, Some(date(2025, 6, 1)), &Recurrence::None, false)
        .expect("Failed to create task");
    db.complete_task(done.id)
        .expect("Failed to complete task")
        .expect("Task should transition");
    db.create_task("grace", "Other owner", None, None, &Recurrence::None, false)
        .expect("Failed to create task");

    let filter = TaskFilter {
        owner: Some("ada".to_string()),
        state: Some(TaskState::Open),
        ..Default::default()
    };
    let tasks = db.list_tasks(Some(&filter)).expect("Failed to list tasks");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, open.id);

    let filter = TaskFilter {
        owner: Some("ada".to_string()),
        state: Some(TaskState::Completed),
        ..Default::default()
    };
    let tasks = db.list_tasks(Some(&filter)).expect("Failed to list tasks");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, done.id);

    let overdue = TaskFilter::overdue("ada", date(2025, 6, 10));
    let tasks = db.list_tasks(Some(&overdue)).expect("Failed to list tasks");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, open.id);
}

#[test]
fn test_soft_deleted_task_visibility() {
    let (_temp_file, mut db) = create_test_db();

    let task = db
        .create_task("ada", "Short-lived", None, None, &Recurrence::None, false)
        .expect("Failed to create task");

    let deleted = db
        .soft_delete_task(task.id)
        .expect("Failed to delete task")
        .expect("Task should exist");
    assert!(deleted.deleted_at.is_some());

    assert!(db.get_task(task.id, false).expect("Failed to get task").is_none());
    assert!(db.get_task(task.id, true).expect("Failed to get task").is_some());

    let default_list = db.list_tasks(None).expect("Failed to list tasks");
    assert!(default_list.is_empty());

    let filter = TaskFilter {
        include_deleted: true,
        ..Default::default()
    };
    let all = db.list_tasks(Some(&filter)).expect("Failed to list tasks");
    assert_eq!(all.len(), 1);

    // Deleting a missing task reports None.
    assert!(db.soft_delete_task(999).expect("Failed to delete task").is_none());
}

#[test]
fn test_create_and_get_habit() {
    let (_temp_file, mut db) = create_test_db();

    let weekly_days = [1, 3, 5].into_iter().collect();
    let habit = db
        .create_habit("ada", "Strength training", HabitFrequency::Weekly, &weekly_days, &Default::default())
        .expect("Failed to create habit");

    let retrieved = db
        .get_habit(habit.id, false)
        .expect("Failed to get habit")
        .expect("Habit should exist");
    assert_eq!(retrieved.frequency, HabitFrequency::Weekly);
    assert_eq!(retrieved.weekly_days, weekly_days);
    assert!(retrieved.monthly_dates.is_empty());
}

#[test]
fn test_add_completion_is_idempotent_per_day() {
    let (_temp_file, mut db) = create_test_db();

    let habit = db
        .create_habit("ada", "Meditate", HabitFrequency::Daily, &Default::default(), &Default::default())
        .expect("Failed to create habit");

    let first = db
        .add_completion(habit.id, date(2025, 6, 10))
        .expect("Failed to add completion");
    let repeat = db
        .add_completion(habit.id, date(2025, 6, 10))
        .expect("Failed to add completion");
    assert_eq!(first.id, repeat.id);

    db.add_completion(habit.id, date(2025, 6, 9))
        .expect("Failed to add completion");

    let completions = db
        .get_completions(habit.id, false)
        .expect("Failed to get completions");
    assert_eq!(completions.len(), 2);
    // Most recent day first, the order the streak calculator expects.
    assert_eq!(completions[0].completed_on, date(2025, 6, 10));
    assert_eq!(completions[1].completed_on, date(2025, 6, 9));
}

#[test]
fn test_add_completion_to_missing_habit_errors() {
    let (_temp_file, mut db) = create_test_db();

    let result = db.add_completion(999, date(2025, 6, 10));
    assert!(matches!(
        result,
        Err(TrackerError::HabitNotFound { id: 999 })
    ));
}

#[test]
fn test_remove_completion_allows_new_check_in() {
    let (_temp_file, mut db) = create_test_db();

    let habit = db
        .create_habit("ada", "Meditate", HabitFrequency::Daily, &Default::default(), &Default::default())
        .expect("Failed to create habit");

    let completion = db
        .add_completion(habit.id, date(2025, 6, 10))
        .expect("Failed to add completion");
    assert!(db
        .remove_completion(completion.id)
        .expect("Failed to remove completion"));
    assert!(!db
        .remove_completion(completion.id)
        .expect("Failed to remove completion"));

    let live = db
        .get_completions(habit.id, false)
        .expect("Failed to get completions");
    assert!(live.is_empty());
    let all = db
        .get_completions(habit.id, true)
        .expect("Failed to get completions");
    assert_eq!(all.len(), 1);

    // The day is free again for a fresh check-in.
    let fresh = db
        .add_completion(habit.id, date(2025, 6, 10))
        .expect("Failed to add completion");
    assert_ne!(fresh.id, completion.id);
}

#[test]
fn test_soft_deleted_habit_visibility() {
    let (_temp_file, mut db) = create_test_db();

    let habit = db
        .create_habit("ada", "Short-lived", HabitFrequency::Daily, &Default::default(), &Default::default())
        .expect("Failed to create habit");

    db.soft_delete_habit(habit.id)
        .expect("Failed to delete habit")
        .expect("Habit should exist");

    assert!(db.get_habit(habit.id, false).expect("Failed to get habit").is_none());
    assert!(db.get_habit(habit.id, true).expect("Failed to get habit").is_some());

    let habits = db.list_habits(None).expect("Failed to list habits");
    assert!(habits.is_empty());
}
