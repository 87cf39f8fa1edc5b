//! Parameter structures for tracker operations.
//!
//! These structures are shared across interfaces (CLI today, other hosts
//! tomorrow) without framework-specific derives. Interface layers wrap them
//! with their own argument types and convert via `From`/`into`, keeping
//! clap and friends out of the core. Free-form user input (date strings,
//! frequency names, recurrence units) is validated here, at the boundary,
//! so the engines downstream only ever see well-formed values.

use std::collections::BTreeSet;
use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, TrackerError},
    models::{HabitFrequency, Recurrence, RecurrenceRule, RecurrenceUnit},
};

/// Parse a `YYYY-MM-DD` string, attributing failures to `field`.
fn parse_date(field: &str, value: &str) -> Result<Date> {
    value.parse::<Date>().map_err(|_| {
        TrackerError::invalid_input(
            field,
            format!("Invalid date: {value}. Expected YYYY-MM-DD"),
        )
    })
}

/// Generic parameters for operations requiring just an ID.
///
/// Used for operations like show_task, complete_task, delete_task,
/// show_habit, and postpone_log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a new task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTask {
    /// Owner the task belongs to
    pub owner: String,
    /// Title of the task (required)
    pub title: String,
    /// Optional free-form notes
    pub notes: Option<String>,
    /// Optional due date as `YYYY-MM-DD`
    pub due_on: Option<String>,
    /// Recurrence kind: 'none', 'daily', 'weekly', 'monthly', or 'custom'
    pub repeat: Option<String>,
    /// Interval for custom recurrence (defaults to 1)
    pub every: Option<u32>,
    /// Unit for custom recurrence: 'days', 'weeks', or 'months'
    pub unit: Option<String>,
    /// Whether the auto-postpone engine may move this task when overdue
    #[serde(default)]
    pub auto_postpone: bool,
}

impl CreateTask {
    /// Validate the raw fields into a typed due date and recurrence.
    ///
    /// # Errors
    ///
    /// * `TrackerError::InvalidInput` - unparseable date, unknown
    ///   recurrence kind or unit, or a zero custom interval
    pub fn validate(&self) -> Result<(Option<Date>, Recurrence)> {
        let due_on = self
            .due_on
            .as_deref()
            .map(|s| parse_date("due_on", s))
            .transpose()?;

        let recurrence = match self.repeat.as_deref() {
            None | Some("none") => Recurrence::None,
            Some("daily") => Recurrence::Daily,
            Some("weekly") => Recurrence::Weekly,
            Some("monthly") => Recurrence::Monthly,
            Some("custom") => {
                let interval = match self.every {
                    Some(0) => {
                        return Err(TrackerError::invalid_input(
                            "every",
                            "Custom interval must be at least 1",
                        ));
                    }
                    Some(n) => n,
                    None => 1,
                };
                let unit = match self.unit.as_deref() {
                    Some(s) => RecurrenceUnit::from_str(s).map_err(|_| {
                        TrackerError::invalid_input(
                            "unit",
                            format!("Invalid unit: {s}. Must be 'days', 'weeks', or 'months'"),
                        )
                    })?,
                    None => RecurrenceUnit::Days,
                };
                Recurrence::Custom(RecurrenceRule { interval, unit })
            }
            Some(other) => {
                return Err(TrackerError::invalid_input(
                    "repeat",
                    format!(
                        "Invalid recurrence: {other}. Must be 'none', 'daily', 'weekly', \
                         'monthly', or 'custom'"
                    ),
                ));
            }
        };

        Ok((due_on, recurrence))
    }
}

/// Parameters for listing tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListTasks {
    /// Restrict the listing to a single owner
    pub owner: Option<String>,
    /// Show completed tasks instead of open ones
    #[serde(default)]
    pub completed: bool,
    /// Show both open and completed tasks
    #[serde(default)]
    pub all: bool,
    /// Include soft-deleted tasks
    #[serde(default)]
    pub include_deleted: bool,
}

/// Parameters for updating an existing task.
///
/// Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// Task ID to update (required)
    pub id: u64,
    /// Updated title
    pub title: Option<String>,
    /// Updated notes
    pub notes: Option<String>,
    /// Updated due date as `YYYY-MM-DD`
    pub due_on: Option<String>,
    /// Updated auto-postpone flag
    pub auto_postpone: Option<bool>,
}

impl UpdateTask {
    /// Validate the raw due date field, if present.
    pub fn validate(&self) -> Result<Option<Date>> {
        self.due_on
            .as_deref()
            .map(|s| parse_date("due_on", s))
            .transpose()
    }
}

/// Parameters for adding a sub-task to a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddSubTask {
    /// ID of the task to extend
    pub task_id: u64,
    /// Title of the sub-task (required)
    pub title: String,
}

/// Parameters for manually postponing a single task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostponeTask {
    /// Task ID to postpone (required)
    pub id: u64,
    /// New due date as `YYYY-MM-DD`
    pub to: String,
}

impl PostponeTask {
    /// Validate the target date.
    pub fn validate(&self) -> Result<Date> {
        parse_date("to", &self.to)
    }
}

/// Parameters for one auto-postpone batch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunAutoPostpone {
    /// Owner whose overdue tasks are considered
    pub owner: String,
    /// Day to move overdue tasks to; defaults to today when absent
    pub as_of: Option<String>,
}

impl RunAutoPostpone {
    /// Validate the optional `as_of` date.
    pub fn validate(&self) -> Result<Option<Date>> {
        self.as_of
            .as_deref()
            .map(|s| parse_date("as_of", s))
            .transpose()
    }
}

/// Parameters for creating a new habit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateHabit {
    /// Owner the habit belongs to
    pub owner: String,
    /// Title of the habit (required)
    pub title: String,
    /// Cadence: 'daily', 'weekly', or 'monthly'
    pub frequency: String,
    /// Scheduled weekdays for weekly habits, Sunday-zero indices (0-6)
    #[serde(default)]
    pub weekly_days: Vec<u8>,
    /// Scheduled days of month for monthly habits (1-31)
    #[serde(default)]
    pub monthly_dates: Vec<u8>,
}

/// Validated habit schedule produced by [`CreateHabit::validate`].
#[derive(Debug)]
pub struct HabitSchedule {
    pub frequency: HabitFrequency,
    pub weekly_days: BTreeSet<u8>,
    pub monthly_dates: BTreeSet<u8>,
}

impl CreateHabit {
    /// Validate the frequency string and schedule ranges.
    ///
    /// # Errors
    ///
    /// * `TrackerError::InvalidInput` - unknown frequency, weekday outside
    ///   0-6, or day-of-month outside 1-31
    pub fn validate(&self) -> Result<HabitSchedule> {
        let frequency = HabitFrequency::from_str(&self.frequency).map_err(|_| {
            TrackerError::invalid_input(
                "frequency",
                format!(
                    "Invalid frequency: {}. Must be 'daily', 'weekly', or 'monthly'",
                    self.frequency
                ),
            )
        })?;

        for &day in &self.weekly_days {
            if day > 6 {
                return Err(TrackerError::invalid_input(
                    "weekly_days",
                    format!("Weekday index {day} is out of range (0-6, Sunday is 0)"),
                ));
            }
        }

        for &date in &self.monthly_dates {
            if !(1..=31).contains(&date) {
                return Err(TrackerError::invalid_input(
                    "monthly_dates",
                    format!("Day of month {date} is out of range (1-31)"),
                ));
            }
        }

        Ok(HabitSchedule {
            frequency,
            weekly_days: self.weekly_days.iter().copied().collect(),
            monthly_dates: self.monthly_dates.iter().copied().collect(),
        })
    }
}

/// Parameters for listing habits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListHabits {
    /// Restrict the listing to a single owner
    pub owner: Option<String>,
    /// Include soft-deleted habits
    #[serde(default)]
    pub include_deleted: bool,
}

/// Parameters for checking in a habit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckIn {
    /// ID of the habit to check in
    pub habit_id: u64,
    /// Day of the completion as `YYYY-MM-DD`; defaults to today when absent
    pub on: Option<String>,
}

impl CheckIn {
    /// Validate the optional completion date.
    pub fn validate(&self) -> Result<Option<Date>> {
        self.on
            .as_deref()
            .map(|s| parse_date("on", s))
            .transpose()
    }
}
