//! tablemix CLI application
//!
//! Command-line interface for the tablemix event grouping tool.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use tablemix_core::OrganizerBuilder;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let renderer = TerminalRenderer::new(!no_color);

    // capacity analysis never touches the database
    if let Some(Analyze(args)) = &command {
        return cli::analyze(&renderer, args);
    }

    let organizer = OrganizerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize organizer")?;

    info!("tablemix started");

    let app = Cli::new(organizer, renderer);
    match command {
        Some(Event { command }) => app.handle_event_command(command).await,
        Some(Participant { command }) => app.handle_participant_command(command).await,
        Some(Round { command }) => app.handle_round_command(command).await,
        Some(Analyze(args)) => cli::analyze(app.renderer(), &args),
        Some(Stats(args)) => app.stats(args).await,
        None => app.list_events().await,
    }
}
