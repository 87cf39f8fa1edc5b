//! Recurrence calculator: advances a due date by one cadence step.

use jiff::{civil::Date, ToSpan};

use crate::models::{Recurrence, RecurrenceUnit};

/// Computes the due date of the next occurrence after `due_on`.
///
/// Pure and total. [`Recurrence::None`] returns the input unchanged; every
/// other kind strictly advances the date. A custom rule with a zero
/// interval advances by one unit, and arithmetic overflow at the calendar
/// limits falls back to the input rather than failing. Month steps use
/// constrained calendar arithmetic: Jan 31 plus one month lands on the last
/// day of February.
pub fn next_due_on(due_on: Date, recurrence: &Recurrence) -> Date {
    let span = match recurrence {
        Recurrence::None => return due_on,
        Recurrence::Daily => 1.days(),
        Recurrence::Weekly => 1.weeks(),
        Recurrence::Monthly => 1.months(),
        Recurrence::Custom(rule) => {
            let interval = i64::from(rule.interval.max(1));
            match rule.unit {
                RecurrenceUnit::Days => interval.days(),
                RecurrenceUnit::Weeks => interval.weeks(),
                RecurrenceUnit::Months => interval.months(),
            }
        }
    };

    due_on.checked_add(span).unwrap_or(due_on)
}
