//! Task, sub-task, and postpone-history operations and queries.
//!
//! The two engines with multi-row side effects live here so that each runs
//! inside a single transaction: [`spawn_next_occurrence`] (the recurrence
//! processor) and [`auto_postpone_overdue`] (the batch postpone engine).
//!
//! [`spawn_next_occurrence`]: super::Database::spawn_next_occurrence
//! [`auto_postpone_overdue`]: super::Database::auto_postpone_overdue

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, OptionalExtension};

use super::{date_col, opt_date_col, opt_timestamp_col, timestamp_col};
use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{
        PostponeHistory, PostponeOutcome, PostponeReason, Recurrence, SubTask, Task, TaskFilter,
        TaskState, UpdateTaskRequest,
    },
    recurrence,
};

const TASK_COLUMNS: &str = "id, owner, title, notes, due_on, original_due_on, recurrence, \
     recurrence_rule, auto_postpone, completed_at, deleted_at, created_at, updated_at";

const INSERT_TASK_SQL: &str = "INSERT INTO tasks (owner, title, notes, due_on, original_due_on, \
     recurrence, recurrence_rule, auto_postpone, completed_at, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";
const CHECK_TASK_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM tasks WHERE id = ?1)";
const UPDATE_TASK_SQL: &str = "UPDATE tasks SET title = ?1, notes = ?2, due_on = ?3, \
     auto_postpone = ?4, updated_at = ?5 WHERE id = ?6";
const COMPLETE_TASK_SQL: &str = "UPDATE tasks SET completed_at = ?1, updated_at = ?1 \
     WHERE id = ?2 AND completed_at IS NULL AND deleted_at IS NULL";
const SOFT_DELETE_TASK_SQL: &str =
    "UPDATE tasks SET deleted_at = ?1, updated_at = ?1 WHERE id = ?2 AND deleted_at IS NULL";
const SELECT_TASK_DETAILS_SQL: &str = "SELECT title, notes, due_on, auto_postpone FROM tasks \
     WHERE id = ?1 AND deleted_at IS NULL";
const OPEN_SIBLING_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM tasks WHERE owner = ?1 \
     AND title = ?2 AND due_on = ?3 AND completed_at IS NULL AND deleted_at IS NULL AND id != ?4)";
const POSTPONE_TASK_SQL: &str = "UPDATE tasks SET original_due_on = COALESCE(original_due_on, \
     due_on), due_on = ?1, updated_at = ?2 WHERE id = ?3";
const SELECT_POSTPONE_CANDIDATES_SQL: &str = "SELECT id, due_on FROM tasks WHERE owner = ?1 \
     AND auto_postpone = 1 AND due_on IS NOT NULL AND due_on < ?2 AND completed_at IS NULL \
     AND deleted_at IS NULL ORDER BY id";
const INSERT_HISTORY_SQL: &str = "INSERT INTO postpone_history (task_id, from_date, to_date, \
     reason, created_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_HISTORY_SQL: &str = "SELECT id, task_id, from_date, to_date, reason, created_at \
     FROM postpone_history WHERE task_id = ?1 ORDER BY id";

const SUBTASK_COLUMNS: &str = "id, task_id, title, completed_at, sort_order, created_at, updated_at";
const INSERT_SUBTASK_SQL: &str = "INSERT INTO subtasks (task_id, title, completed_at, sort_order, \
     created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const NEXT_SUBTASK_ORDER_SQL: &str =
    "SELECT COALESCE(MAX(sort_order), -1) + 1 FROM subtasks WHERE task_id = ?1";
const COMPLETE_SUBTASK_SQL: &str = "UPDATE subtasks SET completed_at = ?1, updated_at = ?1 \
     WHERE id = ?2 AND completed_at IS NULL";
const TOUCH_TASK_SQL: &str = "UPDATE tasks SET updated_at = ?1 WHERE id = ?2";
const TOUCH_TASK_BY_SUBTASK_SQL: &str =
    "UPDATE tasks SET updated_at = ?1 WHERE id = (SELECT task_id FROM subtasks WHERE id = ?2)";

impl super::Database {
    /// Helper to construct a Task (without sub-tasks) from a database row.
    fn build_task_from_row(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        let kind: String = row.get(6)?;
        let rule_json: Option<String> = row.get(7)?;

        Ok(Task {
            id: row.get::<_, i64>(0)? as u64,
            owner: row.get(1)?,
            title: row.get(2)?,
            notes: row.get(3)?,
            due_on: opt_date_col(row, 4)?,
            original_due_on: opt_date_col(row, 5)?,
            recurrence: Recurrence::from_columns(&kind, rule_json.as_deref()),
            auto_postpone: row.get(8)?,
            completed_at: opt_timestamp_col(row, 9)?,
            deleted_at: opt_timestamp_col(row, 10)?,
            created_at: timestamp_col(row, 11)?,
            updated_at: timestamp_col(row, 12)?,
            subtasks: Vec::new(),
        })
    }

    /// Helper to construct a SubTask from a database row.
    fn build_subtask_from_row(row: &rusqlite::Row) -> rusqlite::Result<SubTask> {
        Ok(SubTask {
            id: row.get::<_, i64>(0)? as u64,
            task_id: row.get::<_, i64>(1)? as u64,
            title: row.get(2)?,
            completed_at: opt_timestamp_col(row, 3)?,
            sort_order: row.get::<_, i64>(4)? as u32,
            created_at: timestamp_col(row, 5)?,
            updated_at: timestamp_col(row, 6)?,
        })
    }

    /// Helper to construct a PostponeHistory entry from a database row.
    fn build_history_from_row(row: &rusqlite::Row) -> rusqlite::Result<PostponeHistory> {
        let reason: String = row.get(4)?;
        let reason = reason.parse::<PostponeReason>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                rusqlite::types::Type::Text,
                format!("Invalid postpone reason: {reason}").into(),
            )
        })?;

        Ok(PostponeHistory {
            id: row.get::<_, i64>(0)? as u64,
            task_id: row.get::<_, i64>(1)? as u64,
            from_date: date_col(row, 2)?,
            to_date: date_col(row, 3)?,
            reason,
            created_at: timestamp_col(row, 5)?,
        })
    }

    /// Creates a new task for the given owner.
    pub fn create_task(
        &mut self,
        owner: &str,
        title: &str,
        notes: Option<&str>,
        due_on: Option<Date>,
        recurrence: &Recurrence,
        auto_postpone: bool,
    ) -> Result<Task> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_TASK_SQL,
            params![
                owner,
                title,
                notes,
                due_on.map(|d| d.to_string()),
                None::<String>, // original_due_on is set on first postponement
                recurrence.kind_str(),
                recurrence.rule_json(),
                auto_postpone,
                None::<String>, // new tasks start open
                &now_str,
                &now_str
            ],
        )
        .map_err(|e| TrackerError::database_error("Failed to insert task", e))?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Task {
            id,
            owner: owner.into(),
            title: title.into(),
            notes: notes.map(String::from),
            due_on,
            original_due_on: None,
            recurrence: *recurrence,
            auto_postpone,
            completed_at: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
            subtasks: Vec::new(),
        })
    }

    /// Retrieves a task by its ID with sub-tasks eagerly loaded.
    ///
    /// Soft-deleted tasks are returned only when `include_deleted` is set.
    pub fn get_task(&self, id: u64, include_deleted: bool) -> Result<Option<Task>> {
        let sql = if include_deleted {
            format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1")
        } else {
            format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1 AND deleted_at IS NULL")
        };

        let mut stmt = self
            .connection
            .prepare(&sql)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        let mut task = stmt
            .query_row(params![id as i64], Self::build_task_from_row)
            .optional()
            .map_err(|e| TrackerError::database_error("Failed to query task", e))?;

        if let Some(ref mut task) = task {
            task.subtasks = self.get_subtasks(task.id)?;
        }

        Ok(task)
    }

    /// Lists tasks with optional filtering, sub-tasks eagerly loaded.
    pub fn list_tasks(&self, filter: Option<&TaskFilter>) -> Result<Vec<Task>> {
        let mut query = format!("SELECT {TASK_COLUMNS} FROM tasks");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if !filter.is_some_and(|f| f.include_deleted) {
            conditions.push("deleted_at IS NULL");
        }

        if let Some(f) = filter {
            if let Some(ref owner) = f.owner {
                conditions.push("owner = ?");
                params_vec.push(Box::new(owner.clone()));
            }

            if let Some(ref title) = f.title_contains {
                conditions.push("title LIKE ?");
                params_vec.push(Box::new(format!("%{title}%")));
            }

            if let Some(due_before) = f.due_before {
                conditions.push("due_on IS NOT NULL AND due_on < ?");
                params_vec.push(Box::new(due_before.to_string()));
            }

            match f.state {
                Some(TaskState::Open) => conditions.push("completed_at IS NULL"),
                Some(TaskState::Completed) => conditions.push("completed_at IS NOT NULL"),
                None => {}
            }
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        // Undated tasks sort last; ties break on insertion order.
        query.push_str(" ORDER BY due_on IS NULL, due_on, id");

        let mut stmt = self
            .connection
            .prepare(&query)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let mut tasks: Vec<Task> = stmt
            .query_map(&params_refs[..], Self::build_task_from_row)
            .map_err(|e| TrackerError::database_error("Failed to query tasks", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TrackerError::database_error("Failed to fetch tasks", e))?;

        for task in &mut tasks {
            task.subtasks = self.get_subtasks(task.id)?;
        }

        Ok(tasks)
    }

    /// Updates task details, preserving fields the request leaves unset.
    pub fn update_task(&mut self, task_id: u64, request: UpdateTaskRequest) -> Result<()> {
        if request.is_empty() {
            return Ok(());
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let (current_title, current_notes, current_due, current_auto): (
            String,
            Option<String>,
            Option<String>,
            bool,
        ) = tx
            .query_row(SELECT_TASK_DETAILS_SQL, params![task_id as i64], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })
            .map_err(|e| {
                if matches!(e, rusqlite::Error::QueryReturnedNoRows) {
                    TrackerError::TaskNotFound { id: task_id }
                } else {
                    TrackerError::database_error("Failed to get current task", e)
                }
            })?;

        let new_title = request.title.unwrap_or(current_title);
        let new_notes = request.notes.or(current_notes);
        let new_due = request.due_on.map(|d| d.to_string()).or(current_due);
        let new_auto = request.auto_postpone.unwrap_or(current_auto);

        let now_str = Timestamp::now().to_string();

        tx.execute(
            UPDATE_TASK_SQL,
            params![
                &new_title,
                &new_notes,
                &new_due,
                new_auto,
                &now_str,
                task_id as i64
            ],
        )
        .map_err(|e| TrackerError::database_error("Failed to update task", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    /// Atomically completes an open task.
    ///
    /// Returns the completed task if this call performed the transition,
    /// `None` if the task does not exist, is soft-deleted, or was already
    /// completed. The conditional update makes repeated completion calls
    /// no-ops, which is what lets the caller invoke the recurrence
    /// processor at most once per completion.
    pub fn complete_task(&mut self, task_id: u64) -> Result<Option<Task>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now_str = Timestamp::now().to_string();
        let rows_affected = tx
            .execute(COMPLETE_TASK_SQL, params![&now_str, task_id as i64])
            .map_err(|e| TrackerError::database_error("Failed to complete task", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        if rows_affected == 0 {
            return Ok(None);
        }

        self.get_task(task_id, false)
    }

    /// Spawns the next occurrence of a completed recurring task.
    ///
    /// Creates one new task duplicating the source's fields with a fresh
    /// identifier, the computed next due date, and completion and
    /// original-due-date state reset, then clones each sub-task under the
    /// new task with completion reset and `sort_order` preserved. The
    /// source task itself is not modified.
    ///
    /// Returns `None` without side effects when the task does not exist or
    /// is soft-deleted, does not recur, has no due date, or an open
    /// sibling with the same title already sits on the computed date (the
    /// duplicate-instance guard).
    pub fn spawn_next_occurrence(&mut self, task_id: u64) -> Result<Option<Task>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let source = {
            let mut stmt = tx
                .prepare(&format!(
                    "SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1 AND deleted_at IS NULL"
                ))
                .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

            stmt.query_row(params![task_id as i64], Self::build_task_from_row)
                .optional()
                .map_err(|e| TrackerError::database_error("Failed to query task", e))?
        };

        let Some(source) = source else {
            return Ok(None);
        };
        if source.recurrence.is_none() {
            return Ok(None);
        }
        let Some(due_on) = source.due_on else {
            return Ok(None);
        };

        let next_due = recurrence::next_due_on(due_on, &source.recurrence);

        let sibling_exists: bool = tx
            .query_row(
                OPEN_SIBLING_EXISTS_SQL,
                params![
                    &source.owner,
                    &source.title,
                    next_due.to_string(),
                    task_id as i64
                ],
                |row| row.get(0),
            )
            .map_err(|e| TrackerError::database_error("Failed to check for open sibling", e))?;
        if sibling_exists {
            return Ok(None);
        }

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_TASK_SQL,
            params![
                &source.owner,
                &source.title,
                &source.notes,
                next_due.to_string(),
                None::<String>, // fresh instance starts with no postpone history
                source.recurrence.kind_str(),
                source.recurrence.rule_json(),
                source.auto_postpone,
                None::<String>, // completion reset
                &now_str,
                &now_str
            ],
        )
        .map_err(|e| TrackerError::database_error("Failed to insert next occurrence", e))?;

        let new_id = tx.last_insert_rowid() as u64;

        let source_subtasks: Vec<SubTask> = {
            let mut stmt = tx
                .prepare(&format!(
                    "SELECT {SUBTASK_COLUMNS} FROM subtasks WHERE task_id = ?1 ORDER BY sort_order"
                ))
                .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

            let subtasks = stmt
                .query_map(params![task_id as i64], Self::build_subtask_from_row)
                .map_err(|e| TrackerError::database_error("Failed to query sub-tasks", e))?
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| TrackerError::database_error("Failed to fetch sub-tasks", e))?;
            subtasks
        };

        let mut cloned = Vec::with_capacity(source_subtasks.len());
        for subtask in &source_subtasks {
            tx.execute(
                INSERT_SUBTASK_SQL,
                params![
                    new_id as i64,
                    &subtask.title,
                    None::<String>, // completion reset
                    subtask.sort_order as i64,
                    &now_str,
                    &now_str
                ],
            )
            .map_err(|e| TrackerError::database_error("Failed to clone sub-task", e))?;

            cloned.push(SubTask {
                id: tx.last_insert_rowid() as u64,
                task_id: new_id,
                title: subtask.title.clone(),
                completed_at: None,
                sort_order: subtask.sort_order,
                created_at: now,
                updated_at: now,
            });
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Some(Task {
            id: new_id,
            owner: source.owner,
            title: source.title,
            notes: source.notes,
            due_on: Some(next_due),
            original_due_on: None,
            recurrence: source.recurrence,
            auto_postpone: source.auto_postpone,
            completed_at: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
            subtasks: cloned,
        }))
    }

    /// Moves a single open task's due date and records the move.
    ///
    /// `original_due_on` is preserved across repeated postponements: the
    /// COALESCE only writes it while it is still unset.
    pub fn postpone_task(
        &mut self,
        task_id: u64,
        to: Date,
        reason: PostponeReason,
    ) -> Result<PostponeHistory> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let due_on: Option<String> = tx
            .query_row(
                "SELECT due_on FROM tasks WHERE id = ?1 AND completed_at IS NULL \
                 AND deleted_at IS NULL",
                params![task_id as i64],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| TrackerError::database_error("Failed to query task", e))?
            .ok_or(TrackerError::TaskNotFound { id: task_id })?;

        let Some(from_date) = due_on else {
            return Err(TrackerError::invalid_input(
                "id",
                format!("Task {task_id} has no due date to postpone"),
            ));
        };
        let from_date = from_date.parse::<Date>().map_err(|e| {
            TrackerError::invalid_input("due_on", format!("Stored due date is invalid: {e}"))
        })?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            POSTPONE_TASK_SQL,
            params![to.to_string(), &now_str, task_id as i64],
        )
        .map_err(|e| TrackerError::database_error("Failed to postpone task", e))?;

        tx.execute(
            INSERT_HISTORY_SQL,
            params![
                task_id as i64,
                from_date.to_string(),
                to.to_string(),
                reason.as_str(),
                &now_str
            ],
        )
        .map_err(|e| TrackerError::database_error("Failed to record postpone history", e))?;

        let history_id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(PostponeHistory {
            id: history_id,
            task_id,
            from_date,
            to_date: to,
            reason,
            created_at: now,
        })
    }

    /// Runs the auto-postpone engine for one owner.
    ///
    /// Selects the owner's open, non-deleted tasks flagged for
    /// auto-postpone and due strictly before `as_of`, moves each due date
    /// to `as_of`, preserves `original_due_on`, and appends one history
    /// entry per task. The whole batch commits atomically; any failure
    /// rolls everything back. A repeated run with the same `as_of` selects
    /// nothing and is a no-op.
    pub fn auto_postpone_overdue(&mut self, owner: &str, as_of: Date) -> Result<PostponeOutcome> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let candidates: Vec<(u64, String)> = {
            let mut stmt = tx
                .prepare(SELECT_POSTPONE_CANDIDATES_SQL)
                .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

            let rows = stmt
                .query_map(params![owner, as_of.to_string()], |row| {
                    Ok((row.get::<_, i64>(0)? as u64, row.get(1)?))
                })
                .map_err(|e| TrackerError::database_error("Failed to query overdue tasks", e))?
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| TrackerError::database_error("Failed to fetch overdue tasks", e))?;
            rows
        };

        let now_str = Timestamp::now().to_string();
        let as_of_str = as_of.to_string();
        let mut postponed_task_ids = Vec::with_capacity(candidates.len());

        for (task_id, from_date) in &candidates {
            tx.execute(
                POSTPONE_TASK_SQL,
                params![&as_of_str, &now_str, *task_id as i64],
            )
            .map_err(|e| TrackerError::database_error("Failed to postpone task", e))?;

            tx.execute(
                INSERT_HISTORY_SQL,
                params![*task_id as i64, from_date, &as_of_str, "auto", &now_str],
            )
            .map_err(|e| TrackerError::database_error("Failed to record postpone history", e))?;

            postponed_task_ids.push(*task_id);
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(PostponeOutcome {
            as_of,
            postponed_count: postponed_task_ids.len() as u32,
            postponed_task_ids,
        })
    }

    /// Retrieves the postpone history for a task, oldest first.
    pub fn postpone_history(&self, task_id: u64) -> Result<Vec<PostponeHistory>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_HISTORY_SQL)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        let history = stmt
            .query_map(params![task_id as i64], Self::build_history_from_row)
            .map_err(|e| TrackerError::database_error("Failed to query postpone history", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TrackerError::database_error("Failed to fetch postpone history", e))?;

        Ok(history)
    }

    /// Soft-deletes a task.
    ///
    /// Returns the task's details if it exists (even when it was already
    /// deleted), `None` otherwise.
    pub fn soft_delete_task(&mut self, task_id: u64) -> Result<Option<Task>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now_str = Timestamp::now().to_string();
        let rows_affected = tx
            .execute(SOFT_DELETE_TASK_SQL, params![&now_str, task_id as i64])
            .map_err(|e| TrackerError::database_error("Failed to delete task", e))?;

        if rows_affected == 0 {
            let exists: bool = tx
                .query_row(CHECK_TASK_EXISTS_SQL, params![task_id as i64], |row| {
                    row.get(0)
                })
                .map_err(|e| TrackerError::database_error("Failed to check task existence", e))?;

            if !exists {
                return Ok(None);
            }
            // Task exists but was already deleted; fall through and return it.
        }

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_task(task_id, true)
    }

    /// Adds a new sub-task at the end of the task's sub-task order.
    pub fn add_subtask(&mut self, task_id: u64, title: &str) -> Result<SubTask> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let task_exists: bool = tx
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM tasks WHERE id = ?1 AND deleted_at IS NULL)",
                params![task_id as i64],
                |row| row.get(0),
            )
            .map_err(|e| TrackerError::database_error("Failed to check task existence", e))?;

        if !task_exists {
            return Err(TrackerError::TaskNotFound { id: task_id });
        }

        let next_order: i64 = tx
            .query_row(NEXT_SUBTASK_ORDER_SQL, params![task_id as i64], |row| {
                row.get(0)
            })
            .map_err(|e| TrackerError::database_error("Failed to get next sub-task order", e))?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_SUBTASK_SQL,
            params![
                task_id as i64,
                title,
                None::<String>,
                next_order,
                &now_str,
                &now_str
            ],
        )
        .map_err(|e| TrackerError::database_error("Failed to insert sub-task", e))?;

        let id = tx.last_insert_rowid() as u64;

        tx.execute(TOUCH_TASK_SQL, params![&now_str, task_id as i64])
            .map_err(|e| TrackerError::database_error("Failed to update task timestamp", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(SubTask {
            id,
            task_id,
            title: title.into(),
            completed_at: None,
            sort_order: next_order as u32,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves all sub-tasks for a task, in sort order.
    pub fn get_subtasks(&self, task_id: u64) -> Result<Vec<SubTask>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {SUBTASK_COLUMNS} FROM subtasks WHERE task_id = ?1 ORDER BY sort_order"
            ))
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        let subtasks = stmt
            .query_map(params![task_id as i64], Self::build_subtask_from_row)
            .map_err(|e| TrackerError::database_error("Failed to query sub-tasks", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TrackerError::database_error("Failed to fetch sub-tasks", e))?;

        Ok(subtasks)
    }

    /// Atomically completes an open sub-task.
    ///
    /// Returns `true` if this call performed the transition, `false` if
    /// the sub-task was already completed. Errors if it does not exist.
    pub fn complete_subtask(&mut self, subtask_id: u64) -> Result<bool> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now_str = Timestamp::now().to_string();
        let rows_affected = tx
            .execute(COMPLETE_SUBTASK_SQL, params![&now_str, subtask_id as i64])
            .map_err(|e| TrackerError::database_error("Failed to complete sub-task", e))?;

        if rows_affected == 0 {
            let exists: bool = tx
                .query_row(
                    "SELECT EXISTS(SELECT 1 FROM subtasks WHERE id = ?1)",
                    params![subtask_id as i64],
                    |row| row.get(0),
                )
                .map_err(|e| {
                    TrackerError::database_error("Failed to check sub-task existence", e)
                })?;

            if !exists {
                return Err(TrackerError::SubTaskNotFound { id: subtask_id });
            }

            return Ok(false);
        }

        tx.execute(TOUCH_TASK_BY_SUBTASK_SQL, params![&now_str, subtask_id as i64])
            .map_err(|e| TrackerError::database_error("Failed to update task timestamp", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(true)
    }
}
