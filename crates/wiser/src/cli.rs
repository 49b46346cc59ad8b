//! Clap derive structures for the `wiser` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use wiser_core::{RoomId, RoomMode};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// wiser -- monitor and control a Wiser heat hub
#[derive(Debug, Parser)]
#[command(
    name = "wiser",
    version,
    about = "Monitor and control a Wiser heat hub from the command line",
    long_about = "Talks to the heat hub's local JSON API.\n\n\
        Reads are throttled to the scan interval; every write forces the\n\
        next read through so the result is visible straight away.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file to use instead of the platform default
    #[arg(long, env = "WISER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Hub address (overrides config)
    #[arg(long, short = 'H', env = "WISER_HOST", global = true)]
    pub host: Option<String>,

    /// Hub secret (overrides keyring and config)
    #[arg(long, env = "WISER_SECRET", global = true, hide_env_values = true)]
    pub secret: Option<String>,

    /// Minimum seconds between full refreshes
    #[arg(long, global = true)]
    pub scan_interval: Option<u64>,

    /// Request timeout in seconds
    #[arg(long, env = "WISER_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, short = 'o', env = "WISER_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

impl OutputFormat {
    /// Parse the `output` value from the config file; unknown values fall
    /// back to a table.
    pub fn from_config(value: &str) -> Self {
        <Self as ValueEnum>::from_str(value, true).unwrap_or(Self::Table)
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List rooms with temperature, setpoint and mode
    #[command(alias = "ls")]
    Rooms,

    /// Show one room in detail
    Room {
        /// Room id (see `wiser rooms`)
        room: RoomId,
    },

    /// Show hub status: away mode, firmware, last refresh
    Status,

    /// List battery-powered room sensors with charge level and voltage
    Batteries,

    /// Override a room's target temperature
    #[command(alias = "temp")]
    SetTemp {
        room: RoomId,

        /// Degrees Celsius (5-30, or -20 for off)
        #[arg(allow_negative_numbers = true)]
        temperature: f64,
    },

    /// Switch a room's mode (auto, manual, boost, off)
    #[command(alias = "mode")]
    SetMode { room: RoomId, mode: RoomMode },

    /// Turn whole-house away mode on or off
    Away(AwayArgs),

    /// Poll the hub and print rooms whenever fresh data arrives
    Watch(WatchArgs),

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Away ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

#[derive(Debug, Args)]
pub struct AwayArgs {
    pub state: Switch,

    /// Away setpoint in degrees Celsius (overrides config)
    #[arg(long, short = 't')]
    pub temperature: Option<f64>,
}

// ── Watch ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Seconds between polls; the scan interval still decides when the
    /// hub is actually queried
    #[arg(long, default_value = "30")]
    pub tick: u64,

    /// Stop after this many successful refreshes
    #[arg(long)]
    pub count: Option<u64>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Display the resolved configuration (secret redacted)
    Show,

    /// Write a new config file from --host, --secret and the other
    /// global flags
    Init {
        /// Store the --secret value in the system keyring instead of the file
        #[arg(long)]
        keyring: bool,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
