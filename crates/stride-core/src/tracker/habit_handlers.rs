//! Composed habit workflows built on the low-level habit operations.

use jiff::Zoned;

use super::Tracker;
use crate::{
    display::{Habits, StreakReport},
    error::Result,
    models::{HabitCompletion, HabitFilter},
    params::{CheckIn, Id, ListHabits},
    streak,
};

impl Tracker {
    /// Handle listing habits as a displayable collection.
    pub async fn list_habits_view(&self, params: &ListHabits) -> Result<Habits> {
        let filter = Some(HabitFilter::from(params));
        let habits = self.list_habits(filter).await?;
        Ok(Habits(habits))
    }

    /// Handle checking in a habit.
    ///
    /// The completion day defaults to today in the system time zone.
    /// Checking in twice on the same day returns the existing completion
    /// instead of recording a second one.
    pub async fn check_in(&self, params: &CheckIn) -> Result<HabitCompletion> {
        let on = params.validate()?.unwrap_or_else(|| Zoned::now().date());
        let habit_id = params.habit_id;

        self.with_store(move |db| db.add_completion(habit_id, on))
            .await
    }

    /// Handle computing a habit's streak report.
    ///
    /// Loads the habit with its live completions (already descending by
    /// day, the order the calculator expects) and evaluates the streaks
    /// against today. Returns `None` when the habit does not exist or is
    /// deleted.
    pub async fn habit_streaks(&self, params: &Id) -> Result<Option<StreakReport>> {
        let habit_id = params.id;
        let today = Zoned::now().date();

        self.with_store(move |db| {
            let Some(habit) = db.get_habit(habit_id, false)? else {
                return Ok(None);
            };

            let completions = db.get_completions(habit_id, false)?;
            let summary = streak::calculate_streaks(&habit, &completions, today);

            Ok(Some(StreakReport { habit, summary }))
        })
        .await
    }
}
