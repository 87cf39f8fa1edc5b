//! Display implementations for domain models.
//!
//! All output is markdown intended for terminal rendering: `# {id}. {title}`
//! headers, metadata bullet lists, and ✓/○ completion icons, kept
//! consistent across tasks, habits, and history entries.

use std::fmt;

use super::datetime::{DueDate, LocalDateTime};
use crate::models::{
    Habit, HabitFrequency, PostponeHistory, PostponeReason, Recurrence, StreakSummary, SubTask,
    Task,
};

/// Weekday names indexed by Sunday-zero offset, matching
/// [`Habit::weekly_days`].
const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recurrence::Custom(rule) => {
                if rule.interval == 1 {
                    // "every 1 days" reads badly; trim to the unit.
                    let singular = match rule.unit.as_str() {
                        "days" => "day",
                        "weeks" => "week",
                        _ => "month",
                    };
                    write!(f, "every {singular}")
                } else {
                    write!(f, "every {} {}", rule.interval, rule.unit.as_str())
                }
            }
            other => write!(f, "{}", other.kind_str()),
        }
    }
}

impl fmt::Display for PostponeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for HabitFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Task {
    /// Completion state with a consistent icon for display.
    pub fn status_icon(&self) -> &'static str {
        if self.is_completed() {
            "✓ Done"
        } else {
            "○ Open"
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        // Metadata section
        writeln!(f, "- Status: {}", self.status_icon())?;
        writeln!(f, "- Owner: {}", self.owner)?;
        match self.due_on {
            Some(due) => writeln!(f, "- Due: {}", DueDate::new(due))?,
            None => writeln!(f, "- Due: unscheduled")?,
        }
        if let Some(original) = self.original_due_on {
            writeln!(f, "- Originally due: {original}")?;
        }
        if !self.recurrence.is_none() {
            writeln!(f, "- Repeats: {}", self.recurrence)?;
        }
        if self.auto_postpone {
            writeln!(f, "- Auto-postpone: enabled")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(notes) = &self.notes {
            writeln!(f)?;
            writeln!(f, "{notes}")?;
        }

        if !self.subtasks.is_empty() {
            writeln!(f, "\n## Sub-tasks")?;
            writeln!(f)?;
            for subtask in &self.subtasks {
                write!(f, "{}", subtask)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for SubTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = if self.is_completed() { "✓" } else { "○" };
        writeln!(f, "- {} {}. {}", icon, self.id, self.title)
    }
}

impl Habit {
    /// Human-readable schedule: frequency plus any scheduled days.
    fn schedule_description(&self) -> String {
        match self.frequency {
            HabitFrequency::Daily => "daily".to_string(),
            HabitFrequency::Weekly => {
                if self.weekly_days.is_empty() {
                    "weekly".to_string()
                } else {
                    let days: Vec<&str> = self
                        .weekly_days
                        .iter()
                        .filter_map(|&d| WEEKDAY_NAMES.get(d as usize).copied())
                        .collect();
                    format!("weekly on {}", days.join(", "))
                }
            }
            HabitFrequency::Monthly => {
                if self.monthly_dates.is_empty() {
                    "monthly".to_string()
                } else {
                    let dates: Vec<String> =
                        self.monthly_dates.iter().map(|d| d.to_string()).collect();
                    format!("monthly on day {}", dates.join(", "))
                }
            }
        }
    }
}

impl fmt::Display for Habit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;
        writeln!(f, "- Owner: {}", self.owner)?;
        writeln!(f, "- Schedule: {}", self.schedule_description())?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        Ok(())
    }
}

impl fmt::Display for PostponeHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- {} moved to {} ({}, {})",
            self.from_date,
            self.to_date,
            self.reason,
            LocalDateTime(&self.created_at)
        )
    }
}

impl fmt::Display for StreakSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- Current streak: {}", self.current_streak)?;
        writeln!(f, "- Longest streak: {}", self.longest_streak)?;
        writeln!(f, "- Total completions: {}", self.total_completions)?;
        if let Some(last) = self.last_completed_on {
            writeln!(f, "- Last completed: {last}")?;
        }
        Ok(())
    }
}
