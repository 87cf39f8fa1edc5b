//! Task operations for the Tracker.

use super::Tracker;
use crate::{
    error::Result,
    models::{PostponeHistory, SubTask, Task, TaskFilter, UpdateTaskRequest},
    params::{AddSubTask, CreateTask, Id},
};

impl Tracker {
    /// Creates a new task, validating the raw date and recurrence fields
    /// at this boundary.
    pub async fn create_task(&self, params: &CreateTask) -> Result<Task> {
        let (due_on, recurrence) = params.validate()?;
        let owner = params.owner.clone();
        let title = params.title.clone();
        let notes = params.notes.clone();
        let auto_postpone = params.auto_postpone;

        self.with_store(move |db| {
            db.create_task(
                &owner,
                &title,
                notes.as_deref(),
                due_on,
                &recurrence,
                auto_postpone,
            )
        })
        .await
    }

    /// Retrieves a task by its ID with sub-tasks loaded.
    pub async fn get_task(&self, params: &Id) -> Result<Option<Task>> {
        let task_id = params.id;
        self.with_store(move |db| db.get_task(task_id, false)).await
    }

    /// Lists tasks with optional filtering.
    pub async fn list_tasks(&self, filter: Option<TaskFilter>) -> Result<Vec<Task>> {
        self.with_store(move |db| db.list_tasks(filter.as_ref()))
            .await
    }

    /// Updates task details (title, notes, due date, and/or the
    /// auto-postpone flag).
    pub async fn update_task(&self, task_id: u64, request: UpdateTaskRequest) -> Result<()> {
        self.with_store(move |db| db.update_task(task_id, request))
            .await
    }

    /// Soft-deletes a task, returning its details if it existed.
    pub async fn delete_task(&self, params: &Id) -> Result<Option<Task>> {
        let task_id = params.id;
        self.with_store(move |db| db.soft_delete_task(task_id)).await
    }

    /// Adds a sub-task at the end of the task's sub-task order.
    pub async fn add_subtask(&self, params: &AddSubTask) -> Result<SubTask> {
        let task_id = params.task_id;
        let title = params.title.clone();
        self.with_store(move |db| db.add_subtask(task_id, &title))
            .await
    }

    /// Completes an open sub-task. Returns `false` when it was already
    /// completed.
    pub async fn complete_subtask(&self, params: &Id) -> Result<bool> {
        let subtask_id = params.id;
        self.with_store(move |db| db.complete_subtask(subtask_id))
            .await
    }

    /// Retrieves the postpone history for a task, oldest entry first.
    pub async fn postpone_history(&self, params: &Id) -> Result<Vec<PostponeHistory>> {
        let task_id = params.id;
        self.with_store(move |db| db.postpone_history(task_id))
            .await
    }
}
