//! Composed task workflows built on the low-level task operations.

use jiff::Zoned;
use log::{debug, info};

use super::Tracker;
use crate::{
    display::{CompletionResult, Tasks},
    error::Result,
    models::{PostponeHistory, PostponeOutcome, PostponeReason, Task, TaskFilter},
    params::{Id, ListTasks, PostponeTask, RunAutoPostpone},
};

impl Tracker {
    /// Handle listing tasks as a displayable collection.
    pub async fn list_tasks_view(&self, params: &ListTasks) -> Result<Tasks> {
        let filter = Some(TaskFilter::from(params));
        let tasks = self.list_tasks(filter).await?;
        Ok(Tasks(tasks))
    }

    /// Handle showing a complete task with all its sub-tasks.
    pub async fn show_task_with_subtasks(&self, params: &Id) -> Result<Option<Task>> {
        self.get_task(params).await
    }

    /// Handle completing a task, spawning the next occurrence when it
    /// recurs.
    ///
    /// Marks the task completed with a conditional transition, then runs
    /// the recurrence processor. Because the processor is only invoked
    /// when the transition actually happened (and the processor itself
    /// refuses to duplicate an existing open sibling), completing the same
    /// task twice cannot create two follow-up instances.
    ///
    /// Returns `None` when the task does not exist, is deleted, or was
    /// already completed.
    pub async fn complete_task(&self, params: &Id) -> Result<Option<CompletionResult>> {
        let task_id = params.id;

        self.with_store(move |db| {
            let Some(task) = db.complete_task(task_id)? else {
                return Ok(None);
            };

            let next_occurrence = db.spawn_next_occurrence(task_id)?;
            if let Some(ref next) = next_occurrence {
                debug!(
                    "task {} recurred as task {} due {}",
                    task_id,
                    next.id,
                    next.due_on.map(|d| d.to_string()).unwrap_or_default()
                );
            }

            Ok(Some(CompletionResult {
                task,
                next_occurrence,
            }))
        })
        .await
    }

    /// Handle manually postponing a single task.
    ///
    /// Records a `manual` history entry; the original due date survives
    /// repeated moves.
    pub async fn postpone_task(&self, params: &PostponeTask) -> Result<PostponeHistory> {
        let to = params.validate()?;
        let task_id = params.id;

        self.with_store(move |db| db.postpone_task(task_id, to, PostponeReason::Manual))
            .await
    }

    /// Handle one auto-postpone batch run for an owner.
    ///
    /// `as_of` defaults to today in the system time zone. The run is
    /// all-or-nothing and idempotent within a day: tasks already moved to
    /// `as_of` no longer match the selection predicate.
    pub async fn run_auto_postpone(&self, params: &RunAutoPostpone) -> Result<PostponeOutcome> {
        let as_of = params
            .validate()?
            .unwrap_or_else(|| Zoned::now().date());
        let owner = params.owner.clone();

        let outcome = self
            .with_store(move |db| db.auto_postpone_overdue(&owner, as_of))
            .await?;

        info!(
            "auto-postpone moved {} task(s) to {}",
            outcome.postponed_count, outcome.as_of
        );

        Ok(outcome)
    }
}
