use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{HabitCommands, PostponeArgs, TaskCommands};

/// Main command-line interface for the Stride tracker
///
/// Stride is a habit and task tracker with recurring tasks, automatic
/// postponement of overdue work, and streak counting over habit
/// check-ins. Tasks and habits are scoped to an owner (defaulting to
/// `local`) and stored in a local SQLite database.
#[derive(Parser)]
#[command(version, about, name = "stride")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/stride/stride.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Owner whose tasks and habits are operated on
    #[arg(long, global = true, default_value = "local")]
    pub owner: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Stride CLI
///
/// The CLI is organized into three command categories:
/// - `task`: Operations for managing tasks (create, complete, postpone, etc.)
/// - `habit`: Operations for managing habits and check-ins
/// - `postpone`: Run the auto-postpone pass over the owner's overdue tasks
#[derive(Subcommand)]
pub enum Commands {
    /// Manage tasks
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Manage habits
    #[command(alias = "h")]
    Habit {
        #[command(subcommand)]
        command: HabitCommands,
    },
    /// Move the owner's overdue auto-postpone tasks forward
    Postpone(PostponeArgs),
}
