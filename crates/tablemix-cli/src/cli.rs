//! Command definitions and their handlers.
//!
//! Every command has a clap `Args` wrapper that converts into the matching
//! core parameter struct, so clap attributes never leak into
//! `tablemix-core`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Organizer
//! ```
//!
//! Commands that need more than a field-by-field mapping (reading an
//! import file, writing an export) do that work in [`Cli`] before or
//! after calling the organizer.

use std::{fmt::Display, fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tablemix_core::{
    analysis::{compare_scenarios, RoundCapacity},
    display::{CapacityReport, OperationStatus, ScenarioReport},
    models::{Gender, GenderConstraint, GroupSizing, Participant, Personality},
    params::*,
    GroupingError, Organizer,
};

use crate::renderer::TerminalRenderer;

/// Parses a `MALES:FEMALES` constraint such as `2:2`.
fn parse_constraint(value: &str) -> std::result::Result<GenderConstraint, String> {
    let (males, females) = value
        .split_once(':')
        .ok_or_else(|| format!("expected MALES:FEMALES, got '{value}'"))?;
    let parse = |count: &str| {
        count
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("'{count}' is not a headcount"))
    };
    Ok(GenderConstraint {
        male_count: parse(males)?,
        female_count: parse(females)?,
    })
}

/// Parses a `PEOPLE:SIZE` scenario such as `50:10`.
fn parse_scenario(value: &str) -> std::result::Result<(usize, usize), String> {
    let (people, size) = value
        .split_once(':')
        .ok_or_else(|| format!("expected PEOPLE:SIZE, got '{value}'"))?;
    let parse = |count: &str| {
        count
            .trim()
            .parse::<usize>()
            .map_err(|_| format!("'{count}' is not a count"))
    };
    Ok((parse(people)?, parse(size)?))
}

fn constraint_option(constraints: Vec<GenderConstraint>) -> Option<Vec<GenderConstraint>> {
    if constraints.is_empty() {
        None
    } else {
        Some(constraints)
    }
}

// ============================================================================
// Shared argument groups
// ============================================================================

/// Group sizing flags shared by event and round commands
#[derive(Args)]
pub struct SizingArgs {
    /// Seat everyone at tables of this size
    #[arg(long, conflicts_with = "sizes")]
    pub size: Option<u32>,
    /// Explicit table sizes, one per table, as a comma-separated list
    #[arg(long, value_delimiter = ',')]
    pub sizes: Option<Vec<u32>>,
}

impl SizingArgs {
    /// The requested sizing, if any flag was given.
    pub fn into_sizing(self) -> Option<GroupSizing> {
        match (self.size, self.sizes) {
            (Some(size), _) => Some(GroupSizing::Uniform(size)),
            (None, Some(sizes)) => Some(GroupSizing::Manual(sizes)),
            (None, None) => None,
        }
    }
}

// ============================================================================
// Event commands
// ============================================================================

/// Create a new event
#[derive(Args)]
pub struct CreateEventArgs {
    /// Name of the event
    pub name: String,
    #[command(flatten)]
    pub sizing: SizingArgs,
    /// Per-table gender headcount as MALES:FEMALES, repeat once per table
    #[arg(long = "constraint", value_parser = parse_constraint)]
    pub constraints: Vec<GenderConstraint>,
}

impl From<CreateEventArgs> for CreateEvent {
    fn from(val: CreateEventArgs) -> Self {
        CreateEvent {
            name: val.name,
            group_sizing: val.sizing.into_sizing().unwrap_or_default(),
            gender_constraints: constraint_option(val.constraints),
        }
    }
}

/// Show details of a specific event
#[derive(Args)]
pub struct ShowEventArgs {
    #[arg(help = "Unique identifier of the event to show")]
    pub id: u64,
}

impl From<ShowEventArgs> for Id {
    fn from(val: ShowEventArgs) -> Self {
        Id { id: val.id }
    }
}

/// Change an event's name or default round settings
///
/// Only the given settings change. `--clear-constraints` drops any stored
/// gender constraints.
#[derive(Args)]
pub struct ConfigureEventArgs {
    #[arg(help = "Unique identifier of the event to configure")]
    pub id: u64,
    /// New name of the event
    #[arg(long)]
    pub name: Option<String>,
    #[command(flatten)]
    pub sizing: SizingArgs,
    /// Per-table gender headcount as MALES:FEMALES, repeat once per table
    #[arg(long = "constraint", value_parser = parse_constraint)]
    pub constraints: Vec<GenderConstraint>,
    /// Remove the stored gender constraints
    #[arg(long, conflicts_with = "constraints")]
    pub clear_constraints: bool,
}

impl From<ConfigureEventArgs> for ConfigureEvent {
    fn from(val: ConfigureEventArgs) -> Self {
        ConfigureEvent {
            id: val.id,
            name: val.name,
            group_sizing: val.sizing.into_sizing(),
            gender_constraints: constraint_option(val.constraints),
            clear_constraints: val.clear_constraints,
        }
    }
}

/// Delete an event permanently
#[derive(Args)]
pub struct DeleteEventArgs {
    #[arg(help = "Unique identifier of the event to permanently delete")]
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteEventArgs> for DeleteEvent {
    fn from(val: DeleteEventArgs) -> Self {
        DeleteEvent {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum EventCommands {
    /// Create a new event
    #[command(alias = "c")]
    Create(CreateEventArgs),
    /// List all events
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show details of a specific event
    #[command(alias = "s")]
    Show(ShowEventArgs),
    /// Change an event's name or default round settings
    #[command(alias = "cfg")]
    Configure(ConfigureEventArgs),
    /// Delete an event permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteEventArgs),
}

// ============================================================================
// Participant commands
// ============================================================================

/// Add a participant to an event roster
#[derive(Args)]
pub struct AddParticipantArgs {
    #[arg(help = "Event to add the participant to")]
    pub event_id: u64,
    #[arg(help = "Unique participant id within the event, such as a nickname")]
    pub id: String,
    /// Gender of the participant (male/m or female/f)
    #[arg(short, long)]
    pub gender: Gender,
    /// Personality of the participant (extrovert/e or introvert/i)
    #[arg(short, long, default_value_t = Personality::Extrovert)]
    pub personality: Personality,
}

impl From<AddParticipantArgs> for AddParticipant {
    fn from(val: AddParticipantArgs) -> Self {
        AddParticipant {
            event_id: val.event_id,
            participant: Participant::new(val.id, val.gender, val.personality),
        }
    }
}

/// Remove a participant from an event roster
#[derive(Args)]
pub struct RemoveParticipantArgs {
    pub event_id: u64,
    pub participant_id: String,
}

impl From<RemoveParticipantArgs> for RemoveParticipant {
    fn from(val: RemoveParticipantArgs) -> Self {
        RemoveParticipant {
            event_id: val.event_id,
            participant_id: val.participant_id,
        }
    }
}

/// List an event roster
#[derive(Args)]
pub struct ListParticipantsArgs {
    pub event_id: u64,
}

impl From<ListParticipantsArgs> for Id {
    fn from(val: ListParticipantsArgs) -> Self {
        Id { id: val.event_id }
    }
}

/// Import participants from a JSON file
///
/// The file holds a JSON array of participant objects with `id`, `gender`
/// and optionally `personality`, `meetings_by_round` and `group_history`.
#[derive(Args)]
pub struct ImportParticipantsArgs {
    pub event_id: u64,
    #[arg(help = "Path of the JSON file to import")]
    pub file: PathBuf,
}

#[derive(Subcommand)]
pub enum ParticipantCommands {
    /// Add a participant to an event roster
    #[command(alias = "a")]
    Add(AddParticipantArgs),
    /// Remove a participant from an event roster
    #[command(aliases = ["rm", "d"])]
    Remove(RemoveParticipantArgs),
    /// List an event roster
    #[command(aliases = ["l", "ls"])]
    List(ListParticipantsArgs),
    /// Import participants from a JSON file
    #[command(alias = "i")]
    Import(ImportParticipantsArgs),
}

// ============================================================================
// Round commands
// ============================================================================

/// Compute a draft round
///
/// Sizing and constraint flags override the event's stored settings for
/// this round only. Recomputing an uncommitted round replaces the draft.
#[derive(Args)]
pub struct ComputeRoundArgs {
    pub event_id: u64,
    /// Round number; defaults to the round after the last committed one
    #[arg(short, long)]
    pub round: Option<u32>,
    /// Random seed for a reproducible result
    #[arg(long)]
    pub seed: Option<u64>,
    #[command(flatten)]
    pub sizing: SizingArgs,
    /// Per-table gender headcount as MALES:FEMALES, repeat once per table
    #[arg(long = "constraint", value_parser = parse_constraint)]
    pub constraints: Vec<GenderConstraint>,
}

impl From<ComputeRoundArgs> for ComputeRound {
    fn from(val: ComputeRoundArgs) -> Self {
        ComputeRound {
            event_id: val.event_id,
            round: val.round,
            group_sizing: val.sizing.into_sizing(),
            gender_constraints: constraint_option(val.constraints),
            seed: val.seed,
        }
    }
}

/// Address one round of an event
#[derive(Args)]
pub struct EventRoundArgs {
    pub event_id: u64,
    pub round: u32,
}

impl From<EventRoundArgs> for EventRound {
    fn from(val: EventRoundArgs) -> Self {
        EventRound {
            event_id: val.event_id,
            round: val.round,
        }
    }
}

/// List the stored rounds of an event
#[derive(Args)]
pub struct ListRoundsArgs {
    pub event_id: u64,
}

impl From<ListRoundsArgs> for Id {
    fn from(val: ListRoundsArgs) -> Self {
        Id { id: val.event_id }
    }
}

/// Export the committed rounds of an event as JSON
#[derive(Args)]
pub struct ExportRoundsArgs {
    pub event_id: u64,
    /// Write to this file instead of standard output
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum RoundCommands {
    /// Compute a draft round
    #[command(alias = "c")]
    Compute(ComputeRoundArgs),
    /// Fold a draft round into participant history
    Commit(EventRoundArgs),
    /// Show a stored round
    #[command(alias = "s")]
    Show(EventRoundArgs),
    /// List the stored rounds of an event
    #[command(aliases = ["l", "ls"])]
    List(ListRoundsArgs),
    /// Export the committed rounds of an event as JSON
    #[command(alias = "x")]
    Export(ExportRoundsArgs),
}

// ============================================================================
// Analysis commands
// ============================================================================

/// Round-capacity analysis for a roster size and table size
#[derive(Args)]
pub struct AnalyzeArgs {
    #[arg(help = "Number of people on the roster")]
    pub participants: usize,
    #[arg(help = "Number of people per table")]
    pub group_size: usize,
    #[arg(
        long = "compare",
        value_name = "PEOPLE:SIZE",
        value_parser = parse_scenario,
        help = "Further scenario to tabulate next to this one (repeatable)"
    )]
    pub compare: Vec<(usize, usize)>,
}

/// Pair coverage of an event
#[derive(Args)]
pub struct StatsArgs {
    pub event_id: u64,
}

impl From<StatsArgs> for Id {
    fn from(val: StatsArgs) -> Self {
        Id { id: val.event_id }
    }
}

// ============================================================================
// Handler
// ============================================================================

/// Renders the round-capacity analysis, followed by a comparison table when
/// further scenarios were given; needs no database.
pub fn analyze(renderer: &TerminalRenderer, args: &AnalyzeArgs) -> Result<()> {
    let capacity = RoundCapacity::analyze(args.participants, args.group_size)
        .context("Failed to analyze round capacity")?;
    renderer.render(&CapacityReport(capacity).to_string())?;

    if args.compare.is_empty() {
        return Ok(());
    }
    let mut scenarios = vec![(args.participants, args.group_size)];
    scenarios.extend_from_slice(&args.compare);
    renderer.render("\n")?;
    renderer.render(&ScenarioReport(compare_scenarios(&scenarios)).to_string())
}

/// Runs parsed commands against an [`Organizer`] and renders the results.
pub struct Cli {
    organizer: Organizer,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(organizer: Organizer, renderer: TerminalRenderer) -> Self {
        Self {
            organizer,
            renderer,
        }
    }

    pub fn renderer(&self) -> &TerminalRenderer {
        &self.renderer
    }

    fn show(&self, content: &impl Display) -> Result<()> {
        self.renderer.render(&content.to_string())
    }

    pub async fn list_events(&self) -> Result<()> {
        let events = self
            .organizer
            .list_events_display()
            .await
            .context("Failed to list events")?;
        self.show(&events)
    }

    pub async fn handle_event_command(&self, command: EventCommands) -> Result<()> {
        match command {
            EventCommands::Create(args) => {
                let event = self
                    .organizer
                    .create_event(&args.into())
                    .await
                    .context("Failed to create event")?;
                self.show(&event)
            }
            EventCommands::List => self.list_events().await,
            EventCommands::Show(args) => {
                let params = Id::from(args);
                let event = self
                    .organizer
                    .get_event(&params)
                    .await
                    .context("Failed to load event")?
                    .ok_or(GroupingError::EventNotFound { id: params.id })?;
                self.show(&event)
            }
            EventCommands::Configure(args) => {
                let event = self
                    .organizer
                    .configure_event(&args.into())
                    .await
                    .context("Failed to configure event")?;
                self.show(&event)
            }
            EventCommands::Delete(args) => {
                let params = DeleteEvent::from(args);
                let deleted = self
                    .organizer
                    .delete_event(&params)
                    .await
                    .context("Failed to delete event")?;
                let status = if deleted {
                    OperationStatus::success(format!("Deleted event {}", params.id))
                } else {
                    OperationStatus::failure(format!("Event {} not found", params.id))
                };
                self.show(&status)
            }
        }
    }

    pub async fn handle_participant_command(&self, command: ParticipantCommands) -> Result<()> {
        match command {
            ParticipantCommands::Add(args) => {
                let params = AddParticipant::from(args);
                let participant = self
                    .organizer
                    .add_participant(&params)
                    .await
                    .context("Failed to add participant")?;
                self.show(&OperationStatus::success(format!(
                    "Added participant '{}' to event {}",
                    participant.id, params.event_id
                )))
            }
            ParticipantCommands::Remove(args) => {
                let params = RemoveParticipant::from(args);
                self.organizer
                    .remove_participant(&params)
                    .await
                    .context("Failed to remove participant")?;
                self.show(&OperationStatus::success(format!(
                    "Removed participant '{}' from event {}",
                    params.participant_id, params.event_id
                )))
            }
            ParticipantCommands::List(args) => {
                let roster = self
                    .organizer
                    .list_participants_display(&args.into())
                    .await
                    .context("Failed to list participants")?;
                self.show(&roster)
            }
            ParticipantCommands::Import(args) => {
                let json = fs::read_to_string(&args.file)
                    .with_context(|| format!("Failed to read {}", args.file.display()))?;
                let participants: Vec<Participant> = serde_json::from_str(&json)
                    .with_context(|| format!("Invalid participant file {}", args.file.display()))?;

                let count = self
                    .organizer
                    .import_participants(&ImportParticipants {
                        event_id: args.event_id,
                        participants,
                    })
                    .await
                    .context("Failed to import participants")?;
                self.show(&OperationStatus::success(format!(
                    "Imported {count} participants into event {}",
                    args.event_id
                )))
            }
        }
    }

    pub async fn handle_round_command(&self, command: RoundCommands) -> Result<()> {
        match command {
            RoundCommands::Compute(args) => {
                let report = self
                    .organizer
                    .compute_round_report(&args.into())
                    .await
                    .context("Failed to compute round")?;
                self.show(&report)
            }
            RoundCommands::Commit(args) => {
                let params = EventRound::from(args);
                let updated = self
                    .organizer
                    .commit_round(&params)
                    .await
                    .context("Failed to commit round")?;
                self.show(&OperationStatus::success(format!(
                    "Committed round {} of event {} ({} participants updated)",
                    params.round,
                    params.event_id,
                    updated.len()
                )))
            }
            RoundCommands::Show(args) => {
                let params = EventRound::from(args);
                let report = self
                    .organizer
                    .round_report(&params)
                    .await
                    .context("Failed to load round")?
                    .ok_or(GroupingError::RoundNotFound {
                        event_id: params.event_id,
                        round: params.round,
                    })?;
                self.show(&report)
            }
            RoundCommands::List(args) => {
                let rounds = self
                    .organizer
                    .list_rounds_display(&args.into())
                    .await
                    .context("Failed to list rounds")?;
                self.show(&rounds)
            }
            RoundCommands::Export(args) => {
                let export = self
                    .organizer
                    .export_history(&Id { id: args.event_id })
                    .await
                    .context("Failed to export history")?;
                let json = serde_json::to_string_pretty(&export)?;

                match args.output {
                    Some(path) => {
                        fs::write(&path, json)
                            .with_context(|| format!("Failed to write {}", path.display()))?;
                        self.show(&OperationStatus::success(format!(
                            "Exported {} rounds to {}",
                            export.rounds.len(),
                            path.display()
                        )))
                    }
                    None => {
                        println!("{json}");
                        Ok(())
                    }
                }
            }
        }
    }

    pub async fn stats(&self, args: StatsArgs) -> Result<()> {
        let report = self
            .organizer
            .coverage_report(&args.into())
            .await
            .context("Failed to compute coverage")?;
        self.show(&report)
    }
}
