//! Habit and habit-completion model definitions.

use std::collections::BTreeSet;
use std::str::FromStr;

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

/// Expected cadence of a habit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HabitFrequency {
    /// Every calendar day
    #[default]
    Daily,
    /// On the weekdays listed in [`Habit::weekly_days`]
    Weekly,
    /// On the days-of-month listed in [`Habit::monthly_dates`]
    Monthly,
}

impl FromStr for HabitFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(HabitFrequency::Daily),
            "weekly" => Ok(HabitFrequency::Weekly),
            "monthly" => Ok(HabitFrequency::Monthly),
            _ => Err(format!("Invalid habit frequency: {s}")),
        }
    }
}

impl HabitFrequency {
    /// Convert to the string representation used in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            HabitFrequency::Daily => "daily",
            HabitFrequency::Weekly => "weekly",
            HabitFrequency::Monthly => "monthly",
        }
    }
}

/// A recurring habit tracked by daily check-ins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Habit {
    /// Unique identifier for the habit
    pub id: u64,

    /// Owner the habit belongs to
    pub owner: String,

    /// Title of the habit
    pub title: String,

    /// Expected check-in cadence
    pub frequency: HabitFrequency,

    /// Scheduled weekdays for weekly habits, Sunday-zero indices (0-6)
    #[serde(default)]
    pub weekly_days: BTreeSet<u8>,

    /// Scheduled days of month for monthly habits (1-31)
    #[serde(default)]
    pub monthly_dates: BTreeSet<u8>,

    /// Soft-delete marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,

    /// Timestamp when the habit was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the habit was last modified (UTC)
    pub updated_at: Timestamp,
}

/// A single check-in for a habit on a given day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HabitCompletion {
    /// Unique identifier for the completion
    pub id: u64,

    /// ID of the habit checked in
    pub habit_id: u64,

    /// Owner the completion belongs to
    pub owner: String,

    /// Day the habit was completed (no time component)
    pub completed_on: Date,

    /// Soft-delete marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,

    /// Timestamp when the completion was recorded (UTC)
    pub created_at: Timestamp,
}
