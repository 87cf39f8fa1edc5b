//! Database operations and SQLite management for tasks and habits.
//!
//! This module provides the low-level store for the Stride tracker. It
//! handles the SQLite connection, schema management, and specialized query
//! interfaces for tasks (with sub-tasks and postpone history) and habits
//! (with completions). Multi-row writes run inside a single transaction so
//! readers never observe partial effects: a postponed task always has its
//! history entry, a spawned task instance always has its cloned sub-tasks.
//!
//! Soft-deleted rows stay in the tables; read methods take an explicit
//! `include_deleted` flag (or a filter carrying one) and exclude them by
//! default.

use std::path::Path;

use jiff::{civil::Date, Timestamp};
use rusqlite::{types::Type, Connection};

use crate::error::{DatabaseResultExt, Result};

pub mod habit_queries;
pub mod migrations;
pub mod task_queries;

/// Database connection and operations handler.
///
/// Constructed once by the host (see [`crate::tracker::TrackerBuilder`])
/// and shared by reference for the lifetime of the process.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

/// Parses a required ISO timestamp column.
pub(crate) fn timestamp_col(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Parses a nullable ISO timestamp column.
pub(crate) fn opt_timestamp_col(
    row: &rusqlite::Row,
    idx: usize,
) -> rusqlite::Result<Option<Timestamp>> {
    row.get::<_, Option<String>>(idx)?
        .map(|s| {
            s.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })
        })
        .transpose()
}

/// Parses a required `YYYY-MM-DD` date column.
pub(crate) fn date_col(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Date> {
    row.get::<_, String>(idx)?
        .parse::<Date>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Parses a nullable `YYYY-MM-DD` date column.
pub(crate) fn opt_date_col(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Option<Date>> {
    row.get::<_, Option<String>>(idx)?
        .map(|s| {
            s.parse::<Date>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })
        })
        .transpose()
}
