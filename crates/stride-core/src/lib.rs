//! Core library for the Stride habit and task tracker.
//!
//! This crate provides the business logic for tracking tasks and habits:
//! recurring-task scheduling, overdue auto-postponement with an append-only
//! history trail, and streak computation over habit check-ins, backed by a
//! SQLite store.
//!
//! # Engines
//!
//! - [`recurrence`]: pure calculator advancing a due date by one cadence
//!   step
//! - [`Database::spawn_next_occurrence`]: clones a completed recurring
//!   task (and its sub-tasks) into the next instance, in one transaction
//! - [`Database::auto_postpone_overdue`]: batch-moves an owner's overdue
//!   tasks to a target day, preserving original due dates and appending
//!   history entries, all-or-nothing
//! - [`streak`]: pure calculator walking a habit's completion history
//!
//! # Quick Start
//!
//! ```rust
//! use stride_core::{TrackerBuilder, params::CreateTask};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a tracker instance
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("stride.db"))
//!     .build()
//!     .await?;
//!
//! // Create a weekly recurring task
//! let params = CreateTask {
//!     owner: "ada".to_string(),
//!     title: "Water the plants".to_string(),
//!     due_on: Some("2025-06-02".to_string()),
//!     repeat: Some("weekly".to_string()),
//!     auto_postpone: true,
//!     ..Default::default()
//! };
//!
//! let task = tracker.create_task(&params).await?;
//! println!("Created task: {}", task);
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod recurrence;
pub mod streak;
pub mod tracker;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    CheckInResult, CompletionResult, CreateResult, Habits, OperationStatus, PostponeLog,
    PostponeRunResult, StreakReport, Tasks,
};
pub use error::{Result, TrackerError};
pub use models::{
    Habit, HabitCompletion, HabitFilter, HabitFrequency, PostponeHistory, PostponeOutcome,
    PostponeReason, Recurrence, RecurrenceRule, RecurrenceUnit, StreakSummary, SubTask, Task,
    TaskFilter, TaskState, UpdateTaskRequest,
};
pub use params::{
    AddSubTask, CheckIn, CreateHabit, CreateTask, Id, ListHabits, ListTasks, PostponeTask,
    RunAutoPostpone, UpdateTask,
};
pub use tracker::{Tracker, TrackerBuilder};
