//! Command-line arguments
//!
//! Global flags (configuration, logging, API access) may appear before or
//! after the subcommand. Values left unset here are filled from the
//! environment and then from the config file.

use crate::core::validation::{validate_api_url, validate_event_date, validate_positive_int};
use crate::remote::api::{EventId, UserId};
use crate::report::ReportFormat;
use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Replay frame interval when `--interval` is not given
pub const DEFAULT_REPLAY_INTERVAL_MS: u64 = 300;

#[derive(Parser, Debug, Clone)]
#[command(name = "raffle-admin")]
#[command(about = "Administer raffle events: prizes, participants, QR check-in and results")]
#[command(version, long_version = crate::core::version::long_version())]
#[command(propagate_version = true)]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Base URL of the raffle API
    #[arg(
        long = "api-url",
        value_name = "URL",
        env = "RAFFLE_API_URL",
        value_parser = validate_api_url,
        global = true
    )]
    pub api_url: Option<String>,

    /// Admin bearer token
    #[arg(
        long = "token",
        value_name = "TOKEN",
        env = "RAFFLE_TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub token: Option<String>,

    /// More log output (repeat for more)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Less log output (repeat for less)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Force colored output
    #[arg(long = "color", action = ArgAction::SetTrue, conflicts_with = "no_color", global = true)]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color", action = ArgAction::SetTrue, global = true)]
    pub no_color: bool,

    /// Log level
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        value_parser = ["trace", "debug", "info", "warn", "error", "off"],
        global = true
    )]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(
        long = "log-format",
        value_name = "FORMAT",
        value_parser = ["text", "ext", "json"],
        global = true
    )]
    pub log_format: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create, list, inspect and delete events
    Events {
        #[command(subcommand)]
        action: EventsCommand,
    },
    /// Manage the prizes of an event
    Gifts {
        #[command(subcommand)]
        action: GiftsCommand,
    },
    /// Invite users to an event
    Participants {
        #[command(subcommand)]
        action: ParticipantsCommand,
    },
    /// Browse the user directory
    Users {
        #[command(subcommand)]
        action: UsersCommand,
    },
    /// Mark one participant present
    Attend(AttendArgs),
    /// Check participants in by scanning their QR codes
    Checkin(CheckinArgs),
    /// Export the draw results of an event
    Report(ReportArgs),
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum EventsCommand {
    /// List events
    List {
        /// Only show events whose title contains this text (case-insensitive)
        #[arg(short = 's', long = "search", value_name = "TEXT")]
        search: Option<String>,
    },
    /// Create an event
    Create {
        #[arg(long = "title", value_name = "TITLE")]
        title: String,
        /// Event date (YYYY-MM-DD or RFC 3339)
        #[arg(long = "date", value_name = "DATE", value_parser = validate_event_date)]
        date: String,
    },
    /// Delete an event and everything attached to it
    Delete {
        #[arg(value_name = "EVENT")]
        id: EventId,
        /// Do not ask for confirmation
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
    /// Show prizes, winners and participants of an event
    Show {
        #[arg(value_name = "EVENT")]
        id: EventId,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum GiftsCommand {
    /// Add a prize tier
    Add {
        #[arg(value_name = "EVENT")]
        event: EventId,
        #[arg(long = "name", value_name = "NAME")]
        name: String,
        #[arg(long = "image-url", value_name = "URL")]
        image_url: String,
        /// Prize rank, 1 is the first prize
        #[arg(long = "rank", value_name = "RANK", default_value = "1", value_parser = parse_rank)]
        rank: u32,
    },
    /// Delete a prize
    Delete {
        #[arg(value_name = "EVENT")]
        event: EventId,
        #[arg(value_name = "GIFT")]
        gift: i64,
        /// Do not ask for confirmation
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ParticipantsCommand {
    /// Add users to an event; users already participating are skipped
    Add {
        #[arg(value_name = "EVENT")]
        event: EventId,
        #[arg(value_name = "USER", required = true, num_args = 1..)]
        users: Vec<UserId>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum UsersCommand {
    /// List all users
    List,
}

#[derive(ClapArgs, Debug, Clone, PartialEq)]
pub struct AttendArgs {
    #[arg(value_name = "EVENT")]
    pub event: EventId,
    #[arg(value_name = "USER")]
    pub user: UserId,
    /// Mark the participant absent instead
    #[arg(long = "absent")]
    pub absent: bool,
}

#[derive(ClapArgs, Debug, Clone, PartialEq)]
pub struct CheckinArgs {
    #[arg(value_name = "EVENT")]
    pub event: EventId,
    /// Replay scanned codes from a file (one per line) instead of reading stdin
    #[arg(long = "replay", value_name = "FILE")]
    pub replay: Option<PathBuf>,
    /// Delay between replayed codes in milliseconds
    #[arg(
        long = "interval",
        value_name = "MS",
        default_value_t = DEFAULT_REPLAY_INTERVAL_MS,
        value_parser = validate_positive_int
    )]
    pub interval: u64,
}

#[derive(ClapArgs, Debug, Clone, PartialEq)]
pub struct ReportArgs {
    #[arg(value_name = "EVENT")]
    pub event: EventId,
    /// Output format: text, csv, json or markdown
    #[arg(
        short = 'F',
        long = "format",
        value_name = "FORMAT",
        default_value = "text",
        value_parser = parse_report_format
    )]
    pub format: ReportFormat,
    /// Output file; text goes to stdout and other formats to
    /// Raffle-Results-<title>.<ext> when omitted
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

fn parse_rank(value: &str) -> Result<u32, String> {
    let rank = validate_positive_int(value)?;
    u32::try_from(rank).map_err(|_| format!("Rank {rank} is too large"))
}

fn parse_report_format(value: &str) -> Result<ReportFormat, String> {
    ReportFormat::parse(value).map_err(|e| e.to_string())
}

impl Args {
    /// Net verbosity from `-v`/`-q` counts
    pub fn verbosity(&self) -> i8 {
        let verbose = i8::try_from(self.verbose).unwrap_or(i8::MAX);
        let quiet = i8::try_from(self.quiet).unwrap_or(i8::MAX);
        verbose.saturating_sub(quiet)
    }

    /// Color choice from the command line; `None` leaves it to config or TTY detection
    pub fn color_override(&self) -> Option<bool> {
        match (self.color, self.no_color) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}
