//! Streak counters computed from a habit's completion history.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Counters summarizing a habit's completion history.
///
/// Produced by [`crate::streak::calculate_streaks`]; a habit with no
/// completions yields the all-zero default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreakSummary {
    /// Length of the streak ending at the most recent completion, or zero
    /// when the habit has gone stale (no completion within one cadence
    /// unit of today)
    pub current_streak: u32,

    /// Longest contiguous run anywhere in the scanned history
    pub longest_streak: u32,

    /// Number of distinct completed days
    pub total_completions: u32,

    /// Most recent completed day, if any
    pub last_completed_on: Option<Date>,
}
