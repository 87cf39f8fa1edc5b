//! Habit operations for the Tracker.

use super::Tracker;
use crate::{
    error::Result,
    models::{Habit, HabitCompletion, HabitFilter},
    params::{CreateHabit, Id},
};

impl Tracker {
    /// Creates a new habit, validating the frequency and schedule ranges
    /// at this boundary.
    pub async fn create_habit(&self, params: &CreateHabit) -> Result<Habit> {
        let schedule = params.validate()?;
        let owner = params.owner.clone();
        let title = params.title.clone();

        self.with_store(move |db| {
            db.create_habit(
                &owner,
                &title,
                schedule.frequency,
                &schedule.weekly_days,
                &schedule.monthly_dates,
            )
        })
        .await
    }

    /// Retrieves a habit by its ID.
    pub async fn get_habit(&self, params: &Id) -> Result<Option<Habit>> {
        let habit_id = params.id;
        self.with_store(move |db| db.get_habit(habit_id, false))
            .await
    }

    /// Lists habits with optional filtering.
    pub async fn list_habits(&self, filter: Option<HabitFilter>) -> Result<Vec<Habit>> {
        self.with_store(move |db| db.list_habits(filter.as_ref()))
            .await
    }

    /// Soft-deletes a habit, returning its details if it existed.
    pub async fn delete_habit(&self, params: &Id) -> Result<Option<Habit>> {
        let habit_id = params.id;
        self.with_store(move |db| db.soft_delete_habit(habit_id))
            .await
    }

    /// Retrieves a habit's completions, most recent day first.
    pub async fn get_completions(&self, params: &Id) -> Result<Vec<HabitCompletion>> {
        let habit_id = params.id;
        self.with_store(move |db| db.get_completions(habit_id, false))
            .await
    }

    /// Soft-deletes a completion (undoes a check-in).
    pub async fn remove_completion(&self, params: &Id) -> Result<bool> {
        let completion_id = params.id;
        self.with_store(move |db| db.remove_completion(completion_id))
            .await
    }
}
