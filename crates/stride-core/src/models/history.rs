//! Postpone history models: the audit trail of due-date moves.

use std::str::FromStr;

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

/// Why a task's due date was moved.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PostponeReason {
    /// Moved by the auto-postpone engine
    Auto,
    /// Moved explicitly by the owner
    Manual,
}

impl FromStr for PostponeReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(PostponeReason::Auto),
            "manual" => Ok(PostponeReason::Manual),
            _ => Err(format!("Invalid postpone reason: {s}")),
        }
    }
}

impl PostponeReason {
    /// Convert to the string representation used in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            PostponeReason::Auto => "auto",
            PostponeReason::Manual => "manual",
        }
    }
}

/// One recorded due-date move. Append-only; never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostponeHistory {
    /// Unique identifier for the history entry
    pub id: u64,

    /// ID of the task that was postponed
    pub task_id: u64,

    /// Due date before the move
    pub from_date: Date,

    /// Due date after the move
    pub to_date: Date,

    /// Why the date was moved
    pub reason: PostponeReason,

    /// Timestamp when the entry was recorded (UTC)
    pub created_at: Timestamp,
}

/// Result of one auto-postpone batch run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostponeOutcome {
    /// Day overdue tasks were moved to
    pub as_of: Date,

    /// How many tasks were postponed in this run
    pub postponed_count: u32,

    /// Identifiers of every task postponed in this run
    pub postponed_task_ids: Vec<u64>,
}
