//! Collection wrapper types for displaying groups of domain objects.
//!
//! Newtype wrappers give collections a `Display` implementation with
//! graceful empty-collection handling, keeping formatting decisions out of
//! the handlers that produce them.

use std::fmt;

use crate::models::{Habit, PostponeHistory, Task};

/// Newtype wrapper for displaying collections of tasks.
pub struct Tasks(pub Vec<Task>);

impl Tasks {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of tasks in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the tasks.
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.0.iter()
    }
}

impl fmt::Display for Tasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No tasks found.")
        } else {
            for task in &self.0 {
                write!(f, "{}", task)?;
                writeln!(f)?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying collections of habits.
pub struct Habits(pub Vec<Habit>);

impl Habits {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of habits in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the habits.
    pub fn iter(&self) -> std::slice::Iter<'_, Habit> {
        self.0.iter()
    }
}

impl fmt::Display for Habits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No habits found.")
        } else {
            for habit in &self.0 {
                write!(f, "{}", habit)?;
                writeln!(f)?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying a task's postpone history.
pub struct PostponeLog(pub Vec<PostponeHistory>);

impl PostponeLog {
    /// Check if the log is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of entries in the log.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for PostponeLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No postpone history.")
        } else {
            writeln!(f, "## Postpone history")?;
            writeln!(f)?;
            for entry in &self.0 {
                write!(f, "{}", entry)?;
            }
            Ok(())
        }
    }
}
