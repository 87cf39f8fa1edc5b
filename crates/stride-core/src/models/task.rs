//! Task and sub-task model definitions.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::Recurrence;

/// Represents a single task with its recurrence configuration and sub-tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier for the task
    pub id: u64,

    /// Owner the task belongs to (authenticated by the host)
    pub owner: String,

    /// Title of the task
    pub title: String,

    /// Free-form notes
    pub notes: Option<String>,

    /// Day the task is due, if scheduled
    pub due_on: Option<Date>,

    /// Due date before the first postponement. Set at most once and never
    /// overwritten while non-null.
    pub original_due_on: Option<Date>,

    /// How the task repeats on completion
    #[serde(default)]
    pub recurrence: Recurrence,

    /// Whether the auto-postpone engine may move an overdue due date
    #[serde(default)]
    pub auto_postpone: bool,

    /// When the task was completed (unset while open)
    pub completed_at: Option<Timestamp>,

    /// Soft-delete marker; deleted tasks are hidden from default reads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,

    /// Timestamp when the task was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the task was last modified (UTC)
    pub updated_at: Timestamp,

    /// Ordered sub-tasks (eagerly loaded)
    #[serde(default)]
    pub subtasks: Vec<SubTask>,
}

impl Task {
    /// Whether the task has been completed.
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Whether the task is overdue relative to the given day.
    pub fn is_overdue(&self, today: Date) -> bool {
        !self.is_completed() && self.due_on.is_some_and(|due| due < today)
    }
}

/// An individual sub-task within a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubTask {
    /// Unique identifier for the sub-task
    pub id: u64,

    /// ID of the parent task
    pub task_id: u64,

    /// Title of the sub-task
    pub title: String,

    /// When the sub-task was completed (unset while open)
    pub completed_at: Option<Timestamp>,

    /// Order within the parent task (dense, 0-indexed)
    pub sort_order: u32,

    /// Timestamp when the sub-task was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the sub-task was last updated (UTC)
    pub updated_at: Timestamp,
}

impl SubTask {
    /// Whether the sub-task has been completed.
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Field updates for a task; absent fields are left unchanged.
#[derive(Debug, Default)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub notes: Option<String>,
    pub due_on: Option<Date>,
    pub auto_postpone: Option<bool>,
}

impl UpdateTaskRequest {
    /// Whether the request changes anything at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.notes.is_none()
            && self.due_on.is_none()
            && self.auto_postpone.is_none()
    }
}

impl TryFrom<crate::params::UpdateTask> for UpdateTaskRequest {
    type Error = crate::TrackerError;

    /// Convert raw update parameters into a validated request, parsing the
    /// due-date string at the boundary.
    fn try_from(params: crate::params::UpdateTask) -> Result<Self, Self::Error> {
        let due_on = params.validate()?;

        Ok(Self {
            title: params.title,
            notes: params.notes,
            due_on,
            auto_postpone: params.auto_postpone,
        })
    }
}
