use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{AnalyzeArgs, EventCommands, ParticipantCommands, RoundCommands, StatsArgs};

/// Seat the roster of a recurring social event at tables, round after round
///
/// tablemix keeps each event's roster and the meetings of every committed
/// round, and computes new table assignments that maximize the number of
/// people meeting for the first time. Running without a command lists all
/// events.
#[derive(Parser)]
#[command(version, about, name = "tablemix")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/tablemix/tablemix.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the tablemix CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage events and their default round settings
    #[command(alias = "e")]
    Event {
        #[command(subcommand)]
        command: EventCommands,
    },
    /// Manage the roster of an event
    #[command(alias = "p")]
    Participant {
        #[command(subcommand)]
        command: ParticipantCommands,
    },
    /// Compute, commit and inspect rounds
    #[command(alias = "r")]
    Round {
        #[command(subcommand)]
        command: RoundCommands,
    },
    /// Estimate how many rounds a roster supports before pairs repeat
    #[command(alias = "a")]
    Analyze(AnalyzeArgs),
    /// Show how many roster pairs of an event have met so far
    Stats(StatsArgs),
}
