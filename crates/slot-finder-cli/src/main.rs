//! `slotfind` CLI — find time when a whole group is free.
//!
//! ## Usage
//!
//! ```sh
//! # Free slots from a request file (stdin → stdout when -i/-o are omitted)
//! slotfind find -i request.json
//!
//! # Override constraints from the command line
//! slotfind find -i busy.json --start 2025-01-06 --end 2025-01-10 \
//!     --min-duration 30 --working-hours 09:00-17:00 --days weekdays
//!
//! # Human-readable output
//! slotfind find -i request.json --format text
//!
//! # Earliest qualifying slot only
//! slotfind first -i request.json
//!
//! # Merged group busy blocks, with per-block head counts
//! slotfind busy -i request.json --privacy full
//! ```
//!
//! Logs go to stderr. `RUST_LOG` takes precedence over `-v` / `-vv`.

mod request;

use std::fmt::Write as _;
use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use slot_finder::{BusyBlock, FreeSlot, PrivacyLevel};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::request::{parse_days, parse_working_hours, FindRequest, Overrides};

#[derive(Parser)]
#[command(
    name = "slotfind",
    version,
    about = "Find shared free time across calendars"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List every free slot shared by the group
    Find {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Show only the earliest free slot
    First {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Show the merged group busy blocks over the search range
    Busy {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        search: SearchArgs,
        /// Whether to report how many people are behind each block
        #[arg(long, value_enum, default_value_t = Privacy::Opaque)]
        privacy: Privacy,
    },
}

#[derive(Args)]
struct IoArgs {
    /// Request JSON file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

#[derive(Args)]
struct SearchArgs {
    /// First date to search (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,
    /// Last date to search, inclusive (defaults to the start date)
    #[arg(long)]
    end: Option<NaiveDate>,
    /// Shortest slot worth reporting, in minutes
    #[arg(long)]
    min_duration: Option<i64>,
    /// Daily working hours, e.g. 09:00-17:00 (either side may be left empty)
    #[arg(long)]
    working_hours: Option<String>,
    /// Allowed weekdays, e.g. 1,2,3,4,5 (1 = Monday) or "weekdays"
    #[arg(long)]
    days: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

#[derive(Clone, Copy, ValueEnum)]
enum Privacy {
    Full,
    Opaque,
}

impl From<Privacy> for PrivacyLevel {
    fn from(p: Privacy) -> Self {
        match p {
            Privacy::Full => PrivacyLevel::Full,
            Privacy::Opaque => PrivacyLevel::Opaque,
        }
    }
}

impl SearchArgs {
    fn overrides(&self) -> Result<Overrides> {
        Ok(Overrides {
            start: self.start,
            end: self.end,
            min_duration: self.min_duration,
            working_hours: self
                .working_hours
                .as_deref()
                .map(parse_working_hours)
                .transpose()?,
            days: self.days.as_deref().map(parse_days).transpose()?,
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Find { io, search } => {
            let (request, overrides) = load(&io, &search)?;
            let constraints = request.constraints(&overrides)?;
            let slots = slot_finder::find_free_slots(&request.all_busy(), &constraints)
                .context("Failed to find free slots")?;
            info!(slots = slots.len(), "free-slot search finished");

            let rendered = match io.format {
                Format::Json => to_json(&slots)?,
                Format::Text => render_slots(&slots),
            };
            write_output(io.output.as_deref(), &rendered)?;
        }
        Commands::First { io, search } => {
            let (request, overrides) = load(&io, &search)?;
            let constraints = request.constraints(&overrides)?;
            let slot = slot_finder::find_first_free_slot(&request.all_busy(), &constraints)
                .context("Failed to find a free slot")?;

            let rendered = match io.format {
                Format::Json => to_json(&slot)?,
                Format::Text => match &slot {
                    Some(slot) => render_slots(std::slice::from_ref(slot)),
                    None => "No free slot found\n".to_string(),
                },
            };
            write_output(io.output.as_deref(), &rendered)?;
        }
        Commands::Busy {
            io,
            search,
            privacy,
        } => {
            let (request, overrides) = load(&io, &search)?;
            let constraints = request.constraints(&overrides)?;
            let blocks =
                slot_finder::group_busy_blocks(&request.calendars(), &constraints, privacy.into())
                    .context("Failed to compute busy blocks")?;

            let rendered = match io.format {
                Format::Json => to_json(&blocks)?,
                Format::Text => render_blocks(&blocks),
            };
            write_output(io.output.as_deref(), &rendered)?;
        }
    }

    Ok(())
}

const TEXT_TIME: &str = "%Y-%m-%d %H:%M";

/// Install the stderr log subscriber. `RUST_LOG` wins over the `-v` count.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load(io: &IoArgs, search: &SearchArgs) -> Result<(FindRequest, Overrides)> {
    let raw = read_input(io.input.as_deref())?;
    let request = FindRequest::parse(&raw)?;
    debug!(
        busy = request.busy.len(),
        people = request.people.len(),
        "request loaded"
    );
    Ok((request, search.overrides()?))
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    json.push('\n');
    Ok(json)
}

fn render_slots(slots: &[FreeSlot]) -> String {
    if slots.is_empty() {
        return "No free slots found\n".to_string();
    }
    let mut out = String::new();
    for slot in slots {
        let _ = writeln!(
            out,
            "{} {} - {} ({} min)",
            slot.day_of_week,
            slot.start.format(TEXT_TIME),
            slot.end.format(TEXT_TIME),
            slot.duration_minutes
        );
    }
    out
}

fn render_blocks(blocks: &[BusyBlock]) -> String {
    let mut out = String::new();
    for block in blocks {
        let _ = write!(
            out,
            "{} - {}",
            block.start.format(TEXT_TIME),
            block.end.format(TEXT_TIME)
        );
        // Zero under opaque privacy.
        if block.person_count > 0 {
            let _ = write!(out, " ({} busy)", block.person_count);
        }
        out.push('\n');
    }
    out
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
