//! CLI argument definitions for the agility points tool.

use std::path::PathBuf;

use agility_points::{RunsView, SortOrder, VenueFilter};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "agility",
    version,
    about = "Agility titling points - Tally a dog's runs into titling points",
    long_about = "Tally a dog's trial history into titling points.\n\n\
                  Reads a JSON snapshot holding the competition configuration and one dog,\n\
                  prints the points report as a table and optionally writes printable HTML."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -vvv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix pretty and compact log lines with timestamps.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Aggregate a dog's points and print the report.
    Report(ReportArgs),

    /// List the venues in a snapshot's configuration.
    Venues(VenuesArgs),
}

#[derive(Parser)]
pub struct ReportArgs {
    /// JSON snapshot with the configuration and the dog.
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// JSON file with aggregation filters; flags below override it.
    #[arg(long = "filters", value_name = "FILE")]
    pub filters: Option<PathBuf>,

    /// Earliest date shown (YYYY-MM-DD).
    #[arg(long = "from", value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Latest date shown (YYYY-MM-DD).
    #[arg(long = "to", value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Venue in view, optionally narrowed to a division and level.
    ///
    /// Repeat the flag for several venues. Without it every venue is shown.
    #[arg(long = "venue", value_name = "VENUE[/DIVISION[/LEVEL]]")]
    pub venues: Vec<VenueFilter>,

    /// Which runs are listed (all, qualifying, non-qualifying).
    #[arg(long = "runs", value_name = "VIEW")]
    pub runs: Option<RunsView>,

    /// Break lifetime points down by event instead of by level.
    #[arg(long = "lifetime-by-event")]
    pub lifetime_by_event: bool,

    /// Event sort order, e.g. `event,division,level`.
    #[arg(long = "sort", value_name = "KEYS")]
    pub sort: Option<SortOrder>,

    /// Include titles flagged as hidden.
    #[arg(long = "show-hidden-titles")]
    pub show_hidden_titles: bool,

    /// Report date printed on the dog line (default: today).
    #[arg(long = "as-of", value_name = "DATE")]
    pub as_of: Option<NaiveDate>,

    /// Also write the report as HTML to this path.
    #[arg(long = "html", value_name = "PATH")]
    pub html: Option<PathBuf>,
}

#[derive(Parser)]
pub struct VenuesArgs {
    /// JSON snapshot with the configuration.
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
