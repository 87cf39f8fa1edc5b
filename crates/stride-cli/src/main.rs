//! Stride CLI Application
//!
//! Command-line interface for the Stride habit and task tracker.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use stride_core::{params::ListTasks, TrackerBuilder};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        owner,
        command,
    } = Args::parse();

    let tracker = TrackerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize tracker")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Stride started for owner {owner}");

    let cli = Cli::new(tracker, renderer, owner.clone());

    match command {
        Some(Commands::Task { command }) => cli.handle_task_command(command).await,
        Some(Commands::Habit { command }) => cli.handle_habit_command(command).await,
        Some(Commands::Postpone(args)) => cli.run_auto_postpone(args).await,
        None => {
            cli.list_tasks(&ListTasks {
                owner: Some(owner),
                ..Default::default()
            })
            .await
        }
    }
}
