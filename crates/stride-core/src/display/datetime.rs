//! Date and time display utilities.

use std::fmt;

use jiff::{civil::Date, tz::TimeZone, Timestamp, Zoned};

/// A wrapper around `Timestamp` that formats in the system time zone via
/// the `Display` trait.
///
/// The display format follows the pattern `YYYY-MM-DD HH:MM:SS TZ` with
/// zero-padded components and the local timezone abbreviation.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// A wrapper around a due date that formats it with a relative qualifier:
/// `2025-06-10 (today)`, `2025-06-12 (in 2 days)`, `2025-06-05 (5 days
/// overdue)`.
pub struct DueDate {
    date: Date,
    today: Date,
}

impl DueDate {
    /// Wraps a date, qualified relative to today in the system time zone.
    pub fn new(date: Date) -> Self {
        Self {
            date,
            today: Zoned::now().date(),
        }
    }

    /// Wraps a date with an explicit reference day.
    pub fn relative_to(date: Date, today: Date) -> Self {
        Self { date, today }
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = self
            .today
            .until(self.date)
            .map(|span| span.get_days())
            .unwrap_or(0);

        match days {
            0 => write!(f, "{} (today)", self.date),
            1 => write!(f, "{} (tomorrow)", self.date),
            2.. => write!(f, "{} (in {days} days)", self.date),
            -1 => write!(f, "{} (1 day overdue)", self.date),
            _ => write!(f, "{} ({} days overdue)", self.date, -days),
        }
    }
}
