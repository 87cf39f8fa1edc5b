//! Recurrence configuration for repeating tasks.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unit for custom recurrence intervals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceUnit {
    /// Repeat every N days
    #[default]
    Days,
    /// Repeat every N weeks
    Weeks,
    /// Repeat every N calendar months
    Months,
}

impl FromStr for RecurrenceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" | "days" => Ok(RecurrenceUnit::Days),
            "week" | "weeks" => Ok(RecurrenceUnit::Weeks),
            "month" | "months" => Ok(RecurrenceUnit::Months),
            _ => Err(format!("Invalid recurrence unit: {s}")),
        }
    }
}

impl RecurrenceUnit {
    /// Convert to the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceUnit::Days => "days",
            RecurrenceUnit::Weeks => "weeks",
            RecurrenceUnit::Months => "months",
        }
    }
}

/// Custom recurrence rule: advance the due date by `interval` units.
///
/// An `interval` of zero is treated as one by the calculator; deserialized
/// payloads missing either field fall back to the defaults rather than
/// failing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurrenceRule {
    /// Number of units between occurrences (minimum 1)
    #[serde(default = "default_interval")]
    pub interval: u32,

    /// Unit the interval counts
    #[serde(default)]
    pub unit: RecurrenceUnit,
}

fn default_interval() -> u32 {
    1
}

impl Default for RecurrenceRule {
    fn default() -> Self {
        Self {
            interval: 1,
            unit: RecurrenceUnit::Days,
        }
    }
}

/// How a task repeats once its current instance is completed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    /// One-shot task, no follow-up instance
    #[default]
    None,
    /// Next instance due one day later
    Daily,
    /// Next instance due one week later
    Weekly,
    /// Next instance due one calendar month later
    Monthly,
    /// Next instance due per the attached rule
    Custom(RecurrenceRule),
}

impl Recurrence {
    /// Whether the task repeats at all.
    pub fn is_none(&self) -> bool {
        matches!(self, Recurrence::None)
    }

    /// The custom rule, if this is a custom recurrence.
    pub fn rule(&self) -> Option<&RecurrenceRule> {
        match self {
            Recurrence::Custom(rule) => Some(rule),
            _ => None,
        }
    }

    /// Storage string for the recurrence kind column.
    pub fn kind_str(&self) -> &'static str {
        match self {
            Recurrence::None => "none",
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
            Recurrence::Custom(_) => "custom",
        }
    }

    /// JSON payload for the rule column, present only for custom rules.
    pub fn rule_json(&self) -> Option<String> {
        self.rule().and_then(|rule| serde_json::to_string(rule).ok())
    }

    /// Reassembles a recurrence from its storage columns.
    ///
    /// Unrecognized kinds and malformed rule payloads are absorbed rather
    /// than surfaced: an unknown kind reads as non-recurring, and a custom
    /// kind with an unreadable rule falls back to the one-day default.
    pub fn from_columns(kind: &str, rule_json: Option<&str>) -> Self {
        match kind {
            "daily" => Recurrence::Daily,
            "weekly" => Recurrence::Weekly,
            "monthly" => Recurrence::Monthly,
            "custom" => {
                let rule = rule_json
                    .and_then(|json| serde_json::from_str(json).ok())
                    .unwrap_or_default();
                Recurrence::Custom(rule)
            }
            _ => Recurrence::None,
        }
    }
}
