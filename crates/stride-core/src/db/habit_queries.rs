//! Habit and habit-completion operations and queries.

use std::collections::BTreeSet;

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, OptionalExtension};

use super::{date_col, opt_timestamp_col, timestamp_col};
use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{Habit, HabitCompletion, HabitFilter, HabitFrequency},
};

const HABIT_COLUMNS: &str =
    "id, owner, title, frequency, weekly_days, monthly_dates, deleted_at, created_at, updated_at";
const INSERT_HABIT_SQL: &str = "INSERT INTO habits (owner, title, frequency, weekly_days, \
     monthly_dates, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const CHECK_HABIT_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM habits WHERE id = ?1)";
const SOFT_DELETE_HABIT_SQL: &str =
    "UPDATE habits SET deleted_at = ?1, updated_at = ?1 WHERE id = ?2 AND deleted_at IS NULL";

const COMPLETION_COLUMNS: &str = "id, habit_id, owner, completed_on, deleted_at, created_at";
const INSERT_COMPLETION_SQL: &str = "INSERT INTO habit_completions (habit_id, owner, \
     completed_on, created_at) VALUES (?1, ?2, ?3, ?4)";
const SELECT_LIVE_COMPLETION_SQL: &str = "SELECT id, habit_id, owner, completed_on, deleted_at, \
     created_at FROM habit_completions WHERE habit_id = ?1 AND completed_on = ?2 \
     AND deleted_at IS NULL";
const SOFT_DELETE_COMPLETION_SQL: &str =
    "UPDATE habit_completions SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL";

/// Encodes a schedule set as the comma-separated storage column.
fn encode_schedule(days: &BTreeSet<u8>) -> Option<String> {
    if days.is_empty() {
        None
    } else {
        Some(
            days.iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}

/// Decodes a comma-separated schedule column; unparseable entries are
/// dropped rather than surfaced.
fn decode_schedule(column: Option<String>) -> BTreeSet<u8> {
    column
        .map(|s| s.split(',').filter_map(|part| part.parse().ok()).collect())
        .unwrap_or_default()
}

impl super::Database {
    /// Helper to construct a Habit from a database row.
    fn build_habit_from_row(row: &rusqlite::Row) -> rusqlite::Result<Habit> {
        let frequency: String = row.get(3)?;
        let frequency = frequency.parse::<HabitFrequency>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                rusqlite::types::Type::Text,
                format!("Invalid habit frequency: {frequency}").into(),
            )
        })?;

        Ok(Habit {
            id: row.get::<_, i64>(0)? as u64,
            owner: row.get(1)?,
            title: row.get(2)?,
            frequency,
            weekly_days: decode_schedule(row.get(4)?),
            monthly_dates: decode_schedule(row.get(5)?),
            deleted_at: opt_timestamp_col(row, 6)?,
            created_at: timestamp_col(row, 7)?,
            updated_at: timestamp_col(row, 8)?,
        })
    }

    /// Helper to construct a HabitCompletion from a database row.
    fn build_completion_from_row(row: &rusqlite::Row) -> rusqlite::Result<HabitCompletion> {
        Ok(HabitCompletion {
            id: row.get::<_, i64>(0)? as u64,
            habit_id: row.get::<_, i64>(1)? as u64,
            owner: row.get(2)?,
            completed_on: date_col(row, 3)?,
            deleted_at: opt_timestamp_col(row, 4)?,
            created_at: timestamp_col(row, 5)?,
        })
    }

    /// Creates a new habit for the given owner.
    pub fn create_habit(
        &mut self,
        owner: &str,
        title: &str,
        frequency: HabitFrequency,
        weekly_days: &BTreeSet<u8>,
        monthly_dates: &BTreeSet<u8>,
    ) -> Result<Habit> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_HABIT_SQL,
            params![
                owner,
                title,
                frequency.as_str(),
                encode_schedule(weekly_days),
                encode_schedule(monthly_dates),
                &now_str,
                &now_str
            ],
        )
        .map_err(|e| TrackerError::database_error("Failed to insert habit", e))?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Habit {
            id,
            owner: owner.into(),
            title: title.into(),
            frequency,
            weekly_days: weekly_days.clone(),
            monthly_dates: monthly_dates.clone(),
            deleted_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a habit by its ID.
    ///
    /// Soft-deleted habits are returned only when `include_deleted` is set.
    pub fn get_habit(&self, id: u64, include_deleted: bool) -> Result<Option<Habit>> {
        let sql = if include_deleted {
            format!("SELECT {HABIT_COLUMNS} FROM habits WHERE id = ?1")
        } else {
            format!("SELECT {HABIT_COLUMNS} FROM habits WHERE id = ?1 AND deleted_at IS NULL")
        };

        let mut stmt = self
            .connection
            .prepare(&sql)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        let habit = stmt
            .query_row(params![id as i64], Self::build_habit_from_row)
            .optional()
            .map_err(|e| TrackerError::database_error("Failed to query habit", e))?;

        Ok(habit)
    }

    /// Lists habits with optional filtering.
    pub fn list_habits(&self, filter: Option<&HabitFilter>) -> Result<Vec<Habit>> {
        let mut query = format!("SELECT {HABIT_COLUMNS} FROM habits");

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
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY id");

        let mut stmt = self
            .connection
            .prepare(&query)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let habits = stmt
            .query_map(&params_refs[..], Self::build_habit_from_row)
            .map_err(|e| TrackerError::database_error("Failed to query habits", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TrackerError::database_error("Failed to fetch habits", e))?;

        Ok(habits)
    }

    /// Soft-deletes a habit.
    ///
    /// Returns the habit's details if it exists (even when it was already
    /// deleted), `None` otherwise.
    pub fn soft_delete_habit(&mut self, habit_id: u64) -> Result<Option<Habit>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now_str = Timestamp::now().to_string();
        let rows_affected = tx
            .execute(SOFT_DELETE_HABIT_SQL, params![&now_str, habit_id as i64])
            .map_err(|e| TrackerError::database_error("Failed to delete habit", e))?;

        if rows_affected == 0 {
            let exists: bool = tx
                .query_row(CHECK_HABIT_EXISTS_SQL, params![habit_id as i64], |row| {
                    row.get(0)
                })
                .map_err(|e| TrackerError::database_error("Failed to check habit existence", e))?;

            if !exists {
                return Ok(None);
            }
            // Habit exists but was already deleted; fall through and return it.
        }

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_habit(habit_id, true)
    }

    /// Records a check-in for a habit on the given day.
    ///
    /// Idempotent per day: when a live completion for that day already
    /// exists it is returned unchanged instead of inserting a second row.
    pub fn add_completion(&mut self, habit_id: u64, on: Date) -> Result<HabitCompletion> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let owner: String = tx
            .query_row(
                "SELECT owner FROM habits WHERE id = ?1 AND deleted_at IS NULL",
                params![habit_id as i64],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| TrackerError::database_error("Failed to query habit", e))?
            .ok_or(TrackerError::HabitNotFound { id: habit_id })?;

        let existing = tx
            .query_row(
                SELECT_LIVE_COMPLETION_SQL,
                params![habit_id as i64, on.to_string()],
                Self::build_completion_from_row,
            )
            .optional()
            .map_err(|e| TrackerError::database_error("Failed to query completion", e))?;

        if let Some(existing) = existing {
            return Ok(existing);
        }

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_COMPLETION_SQL,
            params![habit_id as i64, &owner, on.to_string(), &now_str],
        )
        .map_err(|e| TrackerError::database_error("Failed to insert completion", e))?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(HabitCompletion {
            id,
            habit_id,
            owner,
            completed_on: on,
            deleted_at: None,
            created_at: now,
        })
    }

    /// Retrieves a habit's completions, most recent day first.
    ///
    /// The descending order and default exclusion of soft-deleted rows
    /// match what the streak calculator expects as input.
    pub fn get_completions(
        &self,
        habit_id: u64,
        include_deleted: bool,
    ) -> Result<Vec<HabitCompletion>> {
        let sql = if include_deleted {
            format!(
                "SELECT {COMPLETION_COLUMNS} FROM habit_completions WHERE habit_id = ?1 \
                 ORDER BY completed_on DESC, id DESC"
            )
        } else {
            format!(
                "SELECT {COMPLETION_COLUMNS} FROM habit_completions WHERE habit_id = ?1 \
                 AND deleted_at IS NULL ORDER BY completed_on DESC, id DESC"
            )
        };

        let mut stmt = self
            .connection
            .prepare(&sql)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        let completions = stmt
            .query_map(params![habit_id as i64], Self::build_completion_from_row)
            .map_err(|e| TrackerError::database_error("Failed to query completions", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TrackerError::database_error("Failed to fetch completions", e))?;

        Ok(completions)
    }

    /// Soft-deletes a completion (undoes a check-in).
    ///
    /// Returns `true` if a live completion was removed.
    pub fn remove_completion(&mut self, completion_id: u64) -> Result<bool> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now_str = Timestamp::now().to_string();
        let rows_affected = tx
            .execute(
                SOFT_DELETE_COMPLETION_SQL,
                params![&now_str, completion_id as i64],
            )
            .map_err(|e| TrackerError::database_error("Failed to remove completion", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(rows_affected > 0)
    }
}
