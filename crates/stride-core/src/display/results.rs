//! Result wrapper types for displaying operation outcomes.
//!
//! These wrappers format the results of create, complete, postpone, and
//! check-in operations with consistent messaging, and carry the composed
//! data (like the spawned next occurrence of a recurring task) that
//! handlers return to their hosts.

use std::fmt;

use crate::models::{
    Habit, HabitCompletion, PostponeOutcome, StreakSummary, SubTask, Task,
};

/// Wrapper type for displaying the result of create operations.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created task with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<SubTask> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created sub-task with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Habit> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created habit with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Result of completing a task: the completed instance plus the next
/// occurrence the recurrence processor spawned, if any.
pub struct CompletionResult {
    /// The task that was just completed
    pub task: Task,
    /// The freshly created follow-up instance for recurring tasks
    pub next_occurrence: Option<Task>,
}

impl fmt::Display for CompletionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Completed task {}: {}", self.task.id, self.task.title)?;

        if let Some(next) = &self.next_occurrence {
            writeln!(f)?;
            match next.due_on {
                Some(due) => writeln!(
                    f,
                    "Next occurrence created with ID {} due {due}",
                    next.id
                )?,
                None => writeln!(f, "Next occurrence created with ID {}", next.id)?,
            }
            if !next.subtasks.is_empty() {
                writeln!(f, "Carried over {} sub-task(s).", next.subtasks.len())?;
            }
        }

        Ok(())
    }
}

/// Result of one auto-postpone batch run.
pub struct PostponeRunResult(pub PostponeOutcome);

impl fmt::Display for PostponeRunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = &self.0;
        if outcome.postponed_count == 0 {
            writeln!(f, "No overdue tasks to postpone.")
        } else {
            writeln!(
                f,
                "Postponed {} task(s) to {}.",
                outcome.postponed_count, outcome.as_of
            )?;
            for id in &outcome.postponed_task_ids {
                writeln!(f, "- Task {id}")?;
            }
            Ok(())
        }
    }
}

/// Result of a habit check-in.
pub struct CheckInResult(pub HabitCompletion);

impl fmt::Display for CheckInResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Checked in habit {} for {}.",
            self.0.habit_id, self.0.completed_on
        )
    }
}

/// A habit together with its computed streak counters.
pub struct StreakReport {
    pub habit: Habit,
    pub summary: StreakSummary,
}

impl fmt::Display for StreakReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.habit)?;
        writeln!(f, "\n## Streaks")?;
        writeln!(f)?;
        write!(f, "{}", self.summary)
    }
}

/// Wrapper type for displaying operation confirmation messages.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
        }
    }

    /// Create a new failure status.
    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {}",
            if self.success { "Success:" } else { "Error:" },
            self.message
        )
    }
}
