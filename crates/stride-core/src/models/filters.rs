//! Filter types for querying tasks and habits.
//!
//! Soft-deleted rows are excluded from every read unless the filter's
//! `include_deleted` flag is raised explicitly; there is no transparent
//! query interception.

use jiff::civil::Date;

/// Completion-state filter for task queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Tasks not yet completed
    Open,
    /// Tasks with a completion timestamp
    Completed,
}

/// Filter options for querying tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Restrict to a single owner
    pub owner: Option<String>,

    /// Filter by task title (case-insensitive partial match)
    pub title_contains: Option<String>,

    /// Only tasks due strictly before this day
    pub due_before: Option<Date>,

    /// Filter by completion state; `None` returns both open and completed
    pub state: Option<TaskState>,

    /// Include soft-deleted tasks in the results
    pub include_deleted: bool,
}

impl TaskFilter {
    /// Filter matching the auto-postpone selection predicate: the owner's
    /// open, non-deleted tasks due strictly before `as_of`.
    ///
    /// The engine itself applies the `auto_postpone` flag on top of this;
    /// the filter is also useful on its own for listing overdue work.
    pub fn overdue(owner: impl Into<String>, as_of: Date) -> Self {
        Self {
            owner: Some(owner.into()),
            due_before: Some(as_of),
            state: Some(TaskState::Open),
            ..Default::default()
        }
    }
}

/// Filter options for querying habits.
#[derive(Debug, Clone, Default)]
pub struct HabitFilter {
    /// Restrict to a single owner
    pub owner: Option<String>,

    /// Include soft-deleted habits in the results
    pub include_deleted: bool,
}

impl From<&crate::params::ListTasks> for TaskFilter {
    /// Convert ListTasks parameters to a TaskFilter for task queries.
    ///
    /// The `completed` flag selects completed tasks instead of the default
    /// open ones; `all` drops the state restriction entirely.
    fn from(params: &crate::params::ListTasks) -> Self {
        let state = if params.all {
            None
        } else if params.completed {
            Some(TaskState::Completed)
        } else {
            Some(TaskState::Open)
        };

        Self {
            owner: params.owner.clone(),
            state,
            include_deleted: params.include_deleted,
            ..Default::default()
        }
    }
}

impl From<&crate::params::ListHabits> for HabitFilter {
    fn from(params: &crate::params::ListHabits) -> Self {
        Self {
            owner: params.owner.clone(),
            include_deleted: params.include_deleted,
        }
    }
}
