use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag for testing
fn stride_cmd(db_path: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("stride").expect("Failed to find stride binary");
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path.to_str().unwrap());
    cmd
}

#[test]
fn test_cli_add_task_success() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    stride_cmd(&db_path)
        .args(["task", "add", "Water the plants", "--due", "2025-06-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created task with ID: 1"))
        .stdout(predicate::str::contains("Water the plants"));
}

#[test]
fn test_cli_list_empty_tasks() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    stride_cmd(&db_path)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn test_cli_default_command_lists_tasks() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    stride_cmd(&db_path)
        .args(["task", "add", "Default listing"])
        .assert()
        .success();

    stride_cmd(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Default listing"));
}

#[test]
fn test_cli_complete_recurring_task_reports_next_occurrence() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    stride_cmd(&db_path)
        .args([
            "task",
            "add",
            "Weekly review",
            "--due",
            "2025-06-02",
            "--repeat",
            "weekly",
        ])
        .assert()
        .success();

    stride_cmd(&db_path)
        .args(["task", "done", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed task 1"))
        .stdout(predicate::str::contains("due 2025-06-09"));
}

#[test]
fn test_cli_complete_task_twice_reports_not_open() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    stride_cmd(&db_path)
        .args(["task", "add", "One-shot"])
        .assert()
        .success();

    stride_cmd(&db_path)
        .args(["task", "done", "1"])
        .assert()
        .success();

    stride_cmd(&db_path)
        .args(["task", "done", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not open"));
}

#[test]
fn test_cli_postpone_run_moves_overdue_task() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    stride_cmd(&db_path)
        .args([
            "task",
            "add",
            "Call the dentist",
            "--due",
            "2025-06-05",
            "--auto-postpone",
        ])
        .assert()
        .success();

    stride_cmd(&db_path)
        .args(["postpone", "--as-of", "2025-06-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Postponed 1 task(s) to 2025-06-10."));

    // Second run within the same day finds nothing to move.
    stride_cmd(&db_path)
        .args(["postpone", "--as-of", "2025-06-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No overdue tasks to postpone."));

    stride_cmd(&db_path)
        .args(["task", "history", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-06-05 moved to 2025-06-10 (auto"));
}

#[test]
fn test_cli_habit_check_in_and_streaks() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    stride_cmd(&db_path)
        .args(["habit", "add", "Morning run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created habit with ID: 1"));

    stride_cmd(&db_path)
        .args(["habit", "check-in", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checked in habit 1"));

    stride_cmd(&db_path)
        .args(["habit", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current streak: 1"))
        .stdout(predicate::str::contains("Total completions: 1"));
}

#[test]
fn test_cli_invalid_date_is_an_error() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    stride_cmd(&db_path)
        .args(["task", "add", "Bad date", "--due", "someday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn test_cli_owner_scoping() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    stride_cmd(&db_path)
        .args(["--owner", "ada", "task", "add", "Ada's task"])
        .assert()
        .success();

    stride_cmd(&db_path)
        .args(["--owner", "grace", "task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));

    stride_cmd(&db_path)
        .args(["--owner", "ada", "task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada's task"));
}
