//! Streak calculator: counts cadence-matching runs in a habit's
//! completion history.

use jiff::{civil::Date, ToSpan};

use crate::models::{Habit, HabitCompletion, HabitFrequency, StreakSummary};

/// Computes streak counters for `habit` from its completion history.
///
/// `completions` must be sorted descending by date and pre-filtered to
/// non-deleted rows; the repository's default read produces exactly that.
/// Duplicate same-day entries count once. `current_streak` is nonzero only
/// while the habit is live: the most recent completion lies on-or-before
/// `today` and no earlier than the previous scheduled day relative to
/// `today`. `longest_streak` scans the whole history regardless of recency.
///
/// Pure over the supplied snapshot; an empty history yields zero counters.
pub fn calculate_streaks(
    habit: &Habit,
    completions: &[HabitCompletion],
    today: Date,
) -> StreakSummary {
    let days = distinct_days(completions);
    let Some(&latest) = days.first() else {
        return StreakSummary::default();
    };

    let live = latest <= today && latest >= previous_scheduled(habit, today);
    let current_streak = if live { run_length(habit, &days, 0) } else { 0 };

    let mut longest_streak = 0;
    let mut start = 0;
    while start < days.len() {
        let len = run_length(habit, &days, start);
        longest_streak = longest_streak.max(len);
        start += len as usize;
    }

    StreakSummary {
        current_streak,
        longest_streak,
        total_completions: days.len() as u32,
        last_completed_on: Some(latest),
    }
}

/// Collapses the descending completion list to distinct days.
fn distinct_days(completions: &[HabitCompletion]) -> Vec<Date> {
    let mut days: Vec<Date> = Vec::with_capacity(completions.len());
    for completion in completions {
        if days.last() != Some(&completion.completed_on) {
            days.push(completion.completed_on);
        }
    }
    days
}

/// Length of the contiguous cadence-matching run starting at `start`.
fn run_length(habit: &Habit, days: &[Date], start: usize) -> u32 {
    let mut len = 1;
    let mut idx = start;
    while idx + 1 < days.len() && days[idx + 1] == previous_scheduled(habit, days[idx]) {
        len += 1;
        idx += 1;
    }
    len
}

/// The latest scheduled day strictly before `day` for the habit's cadence.
///
/// Weekly habits with an empty `weekly_days` set fall back to the same
/// weekday one week earlier; monthly habits with an empty `monthly_dates`
/// set fall back to the same day one month earlier. Scheduled days of
/// month beyond a month's length clamp to its last day.
fn previous_scheduled(habit: &Habit, day: Date) -> Date {
    match habit.frequency {
        HabitFrequency::Daily => day.checked_sub(1.days()).unwrap_or(day),
        HabitFrequency::Weekly => {
            if habit.weekly_days.is_empty() {
                return day.checked_sub(7.days()).unwrap_or(day);
            }
            for back in 1..=7 {
                let Ok(candidate) = day.checked_sub(back.days()) else {
                    break;
                };
                let weekday = candidate.weekday().to_sunday_zero_offset() as u8;
                if habit.weekly_days.contains(&weekday) {
                    return candidate;
                }
            }
            day.checked_sub(7.days()).unwrap_or(day)
        }
        HabitFrequency::Monthly => {
            if habit.monthly_dates.is_empty() {
                return day.checked_sub(1.months()).unwrap_or(day);
            }
            // Latest scheduled day earlier in the same month, if any.
            let earlier = habit
                .monthly_dates
                .iter()
                .copied()
                .filter(|&d| (d as i8) < day.day())
                .max();
            if let Some(d) = earlier {
                return Date::new(day.year(), day.month(), d as i8).unwrap_or(day);
            }
            // Otherwise the last scheduled day of the previous month,
            // clamped to that month's length.
            let prev_end = day
                .first_of_month()
                .checked_sub(1.days())
                .unwrap_or(day);
            let target = habit
                .monthly_dates
                .iter()
                .copied()
                .max()
                .map(|d| (d as i8).min(prev_end.day()))
                .unwrap_or(prev_end.day());
            Date::new(prev_end.year(), prev_end.month(), target).unwrap_or(prev_end)
        }
    }
}
