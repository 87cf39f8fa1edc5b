//! Data models for tasks, habits, and their histories.
//!
//! This module contains the core domain models of the Stride tracker.
//! Display implementations live in [`crate::display::models`] to keep data
//! structures separate from presentation concerns: every model formats as
//! markdown for terminal rendering, with completion icons and metadata
//! bullet lists following a shared structure.

pub mod filters;
pub mod habit;
pub mod history;
pub mod recurrence;
pub mod streak;
pub mod task;

#[cfg(test)]
mod tests;

// Re-export all public types at the models level
pub use filters::{HabitFilter, TaskFilter, TaskState};
pub use habit::{Habit, HabitCompletion, HabitFrequency};
pub use history::{PostponeHistory, PostponeOutcome, PostponeReason};
pub use recurrence::{Recurrence, RecurrenceRule, RecurrenceUnit};
pub use streak::StreakSummary;
pub use task::{SubTask, Task, UpdateTaskRequest};
