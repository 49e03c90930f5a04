//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser};
use pacer_config::parse_duration;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(
    name = "pacer",
    version,
    about = "Pace work to a target rate for a duration or a count, with a simple or baseline pacer"
)]
pub struct Cli {
    /// Path to config TOML; flags given on the command line take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log as JSON lines and print the run summary as a JSON object
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "info",
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    pub log_level: String,

    /// Desired rate per second (the baseline pacer rounds it to an integer)
    #[arg(long, value_name = "PER_SEC", allow_negative_numbers = true)]
    pub rate: Option<f64>,

    /// Run length, e.g. 500ms, 2s, 1m30s [default: 500ms]
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    pub duration: Option<Duration>,

    /// When > 0, run exactly this many iterations; supersedes --duration
    #[arg(long, value_name = "N")]
    pub exactly: Option<u64>,

    /// Use the leaky-bucket baseline pacer instead of the simple one
    #[arg(long, visible_alias = "uber", action = ArgAction::SetTrue)]
    pub baseline: bool,

    /// Print inter-tick interval stats to stderr after the run
    #[arg(long, action = ArgAction::SetTrue)]
    pub stats: bool,
}
