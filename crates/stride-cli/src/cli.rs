//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure with clap's derive API, using the
//! parameter wrapper pattern: each subcommand has a clap-specific argument
//! struct that converts into the corresponding interface-agnostic core
//! parameter type via `into_params`. Clap concerns (flags, help text,
//! aliases) stay here; validation of the values themselves happens in the
//! core at the params boundary.
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Tracker
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use stride_core::{
    params::{
        AddSubTask, CheckIn, CreateHabit, CreateTask, Id, ListHabits, ListTasks, PostponeTask,
        RunAutoPostpone,
    },
    CheckInResult, CreateResult, OperationStatus, PostponeLog, PostponeRunResult, Tracker,
};

use crate::renderer::TerminalRenderer;

/// Task management subcommands
#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a new task
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// List tasks
    #[command(alias = "ls")]
    List(ListTasksArgs),
    /// Show details of a specific task
    Show(IdArg),
    /// Complete a task, spawning the next occurrence if it recurs
    Done(IdArg),
    /// Move a task's due date, recording the postponement
    Postpone(PostponeTaskArgs),
    /// Show a task's postpone history
    History(IdArg),
    /// Add a sub-task to a task
    Sub(AddSubTaskArgs),
    /// Complete a sub-task
    SubDone(IdArg),
    /// Delete a task
    Delete(IdArg),
}

/// Habit management subcommands
#[derive(Subcommand)]
pub enum HabitCommands {
    /// Add a new habit
    #[command(alias = "a")]
    Add(AddHabitArgs),
    /// List habits
    #[command(alias = "ls")]
    List,
    /// Show a habit with its streak report
    Show(IdArg),
    /// Record a check-in for a habit
    CheckIn(CheckInArgs),
    /// Delete a habit
    Delete(IdArg),
}

/// Generic ID argument shared by show/done/delete-style commands
#[derive(Args)]
pub struct IdArg {
    /// Unique identifier of the resource to operate on
    pub id: u64,
}

impl From<IdArg> for Id {
    fn from(val: IdArg) -> Self {
        Id { id: val.id }
    }
}

/// Add a new task
#[derive(Args)]
pub struct AddTaskArgs {
    /// Title of the task
    pub title: String,
    /// Optional free-form notes
    #[arg(short, long)]
    pub notes: Option<String>,
    /// Due date as YYYY-MM-DD
    #[arg(long)]
    pub due: Option<String>,
    /// Recurrence: daily, weekly, monthly, or custom
    #[arg(long)]
    pub repeat: Option<String>,
    /// Interval for custom recurrence (defaults to 1)
    #[arg(long, requires = "repeat")]
    pub every: Option<u32>,
    /// Unit for custom recurrence: days, weeks, or months
    #[arg(long, requires = "repeat")]
    pub unit: Option<String>,
    /// Let the auto-postpone pass move this task when it goes overdue
    #[arg(long)]
    pub auto_postpone: bool,
}

impl AddTaskArgs {
    /// Convert CLI arguments to core parameters for the given owner.
    pub fn into_params(self, owner: String) -> CreateTask {
        CreateTask {
            owner,
            title: self.title,
            notes: self.notes,
            due_on: self.due,
            repeat: self.repeat,
            every: self.every,
            unit: self.unit,
            auto_postpone: self.auto_postpone,
        }
    }
}

/// List tasks
#[derive(Args)]
pub struct ListTasksArgs {
    /// Show completed tasks instead of open ones
    #[arg(long)]
    pub completed: bool,
    /// Show both open and completed tasks
    #[arg(long, conflicts_with = "completed")]
    pub all: bool,
}

impl ListTasksArgs {
    /// Convert CLI arguments to core parameters for the given owner.
    pub fn into_params(self, owner: String) -> ListTasks {
        ListTasks {
            owner: Some(owner),
            completed: self.completed,
            all: self.all,
            include_deleted: false,
        }
    }
}

/// Move a task's due date
#[derive(Args)]
pub struct PostponeTaskArgs {
    /// Unique identifier of the task to postpone
    pub id: u64,
    /// New due date as YYYY-MM-DD
    pub to: String,
}

impl From<PostponeTaskArgs> for PostponeTask {
    fn from(val: PostponeTaskArgs) -> Self {
        PostponeTask {
            id: val.id,
            to: val.to,
        }
    }
}

/// Add a sub-task to a task
#[derive(Args)]
pub struct AddSubTaskArgs {
    /// Unique identifier of the parent task
    pub task_id: u64,
    /// Title of the sub-task
    pub title: String,
}

impl From<AddSubTaskArgs> for AddSubTask {
    fn from(val: AddSubTaskArgs) -> Self {
        AddSubTask {
            task_id: val.task_id,
            title: val.title,
        }
    }
}

/// Add a new habit
#[derive(Args)]
pub struct AddHabitArgs {
    /// Title of the habit
    pub title: String,
    /// Cadence: daily, weekly, or monthly
    #[arg(long, default_value = "daily")]
    pub frequency: String,
    /// Scheduled weekdays for weekly habits (0-6, Sunday is 0)
    #[arg(long = "on-days", value_delimiter = ',')]
    pub weekly_days: Vec<u8>,
    /// Scheduled days of month for monthly habits (1-31)
    #[arg(long = "on-dates", value_delimiter = ',')]
    pub monthly_dates: Vec<u8>,
}

impl AddHabitArgs {
    /// Convert CLI arguments to core parameters for the given owner.
    pub fn into_params(self, owner: String) -> CreateHabit {
        CreateHabit {
            owner,
            title: self.title,
            frequency: self.frequency,
            weekly_days: self.weekly_days,
            monthly_dates: self.monthly_dates,
        }
    }
}

/// Record a check-in for a habit
#[derive(Args)]
pub struct CheckInArgs {
    /// Unique identifier of the habit
    pub id: u64,
    /// Day of the completion as YYYY-MM-DD; defaults to today
    #[arg(long)]
    pub date: Option<String>,
}

impl From<CheckInArgs> for CheckIn {
    fn from(val: CheckInArgs) -> Self {
        CheckIn {
            habit_id: val.id,
            on: val.date,
        }
    }
}

/// Run the auto-postpone pass
#[derive(Args)]
pub struct PostponeArgs {
    /// Day to move overdue tasks to; defaults to today
    #[arg(long)]
    pub as_of: Option<String>,
}

impl PostponeArgs {
    /// Convert CLI arguments to core parameters for the given owner.
    pub fn into_params(self, owner: String) -> RunAutoPostpone {
        RunAutoPostpone {
            owner,
            as_of: self.as_of,
        }
    }
}

/// Command dispatcher pairing a tracker with a renderer and an owner.
pub struct Cli {
    tracker: Tracker,
    renderer: TerminalRenderer,
    owner: String,
}

impl Cli {
    /// Create a new CLI dispatcher.
    pub fn new(tracker: Tracker, renderer: TerminalRenderer, owner: String) -> Self {
        Self {
            tracker,
            renderer,
            owner,
        }
    }

    /// Dispatch a task subcommand.
    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Add(args) => {
                let params = args.into_params(self.owner.clone());
                let task = self.tracker.create_task(&params).await?;
                self.renderer.render(&CreateResult::new(task).to_string())
            }
            TaskCommands::List(args) => {
                let params = args.into_params(self.owner.clone());
                self.list_tasks(&params).await
            }
            TaskCommands::Show(args) => {
                let params = args.into();
                match self.tracker.show_task_with_subtasks(&params).await? {
                    Some(task) => self.renderer.render(&task.to_string()),
                    None => self.render_missing("Task", params.id),
                }
            }
            TaskCommands::Done(args) => {
                let params = args.into();
                match self.tracker.complete_task(&params).await? {
                    Some(result) => self.renderer.render(&result.to_string()),
                    None => self.renderer.render(
                        &OperationStatus::failure(format!(
                            "Task {} is not open (missing, deleted, or already completed)",
                            params.id
                        ))
                        .to_string(),
                    ),
                }
            }
            TaskCommands::Postpone(args) => {
                let entry = self.tracker.postpone_task(&args.into()).await?;
                self.renderer.render(
                    &OperationStatus::success(format!(
                        "Postponed task {} from {} to {}",
                        entry.task_id, entry.from_date, entry.to_date
                    ))
                    .to_string(),
                )
            }
            TaskCommands::History(args) => {
                let history = self.tracker.postpone_history(&args.into()).await?;
                self.renderer.render(&PostponeLog(history).to_string())
            }
            TaskCommands::Sub(args) => {
                let subtask = self.tracker.add_subtask(&args.into()).await?;
                self.renderer
                    .render(&CreateResult::new(subtask).to_string())
            }
            TaskCommands::SubDone(args) => {
                let params: Id = args.into();
                let transitioned = self.tracker.complete_subtask(&params).await?;
                let status = if transitioned {
                    OperationStatus::success(format!("Completed sub-task {}", params.id))
                } else {
                    OperationStatus::failure(format!("Sub-task {} was already completed", params.id))
                };
                self.renderer.render(&status.to_string())
            }
            TaskCommands::Delete(args) => {
                let params = args.into();
                match self.tracker.delete_task(&params).await? {
                    Some(task) => self.renderer.render(
                        &OperationStatus::success(format!("Deleted task {}: {}", task.id, task.title))
                            .to_string(),
                    ),
                    None => self.render_missing("Task", params.id),
                }
            }
        }
    }

    /// Dispatch a habit subcommand.
    pub async fn handle_habit_command(&self, command: HabitCommands) -> Result<()> {
        match command {
            HabitCommands::Add(args) => {
                let params = args.into_params(self.owner.clone());
                let habit = self.tracker.create_habit(&params).await?;
                self.renderer.render(&CreateResult::new(habit).to_string())
            }
            HabitCommands::List => {
                let params = ListHabits {
                    owner: Some(self.owner.clone()),
                    ..Default::default()
                };
                let habits = self.tracker.list_habits_view(&params).await?;
                self.renderer.render(&habits.to_string())
            }
            HabitCommands::Show(args) => {
                let params = args.into();
                match self.tracker.habit_streaks(&params).await? {
                    Some(report) => self.renderer.render(&report.to_string()),
                    None => self.render_missing("Habit", params.id),
                }
            }
            HabitCommands::CheckIn(args) => {
                let completion = self.tracker.check_in(&args.into()).await?;
                self.renderer
                    .render(&CheckInResult(completion).to_string())
            }
            HabitCommands::Delete(args) => {
                let params = args.into();
                match self.tracker.delete_habit(&params).await? {
                    Some(habit) => self.renderer.render(
                        &OperationStatus::success(format!(
                            "Deleted habit {}: {}",
                            habit.id, habit.title
                        ))
                        .to_string(),
                    ),
                    None => self.render_missing("Habit", params.id),
                }
            }
        }
    }

    /// Run the auto-postpone pass for the owner.
    pub async fn run_auto_postpone(&self, args: PostponeArgs) -> Result<()> {
        let params = args.into_params(self.owner.clone());
        let outcome = self.tracker.run_auto_postpone(&params).await?;
        self.renderer.render(&PostponeRunResult(outcome).to_string())
    }

    /// List tasks for the owner; also the default action with no command.
    pub async fn list_tasks(&self, params: &ListTasks) -> Result<()> {
        let tasks = self.tracker.list_tasks_view(params).await?;
        self.renderer.render(&tasks.to_string())
    }

    fn render_missing(&self, kind: &str, id: u64) -> Result<()> {
        self.renderer
            .render(&OperationStatus::failure(format!("{kind} {id} not found")).to_string())
    }
}
