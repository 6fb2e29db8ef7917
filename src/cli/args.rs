//! Command-line arguments
//!
//! ```bash
//! driftwatch check --reference data/btc.csv
//! driftwatch check --reference ref.csv --current today.csv --output-dir reports/
//! driftwatch stats data/btc.csv --format json
//! driftwatch config --output drift.yaml
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Driftwatch: statistical data drift detection
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "driftwatch")]
#[command(version)]
#[command(about = "Detect distribution drift between a reference and a current data snapshot")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Compare a current snapshot against a reference snapshot
    Check(CheckArgs),

    /// Show the statistics the engine would freeze for a reference snapshot
    Stats(StatsArgs),

    /// Print, write or validate a drift configuration file
    Config(ConfigArgs),
}

/// Arguments for the check command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct CheckArgs {
    /// Reference CSV file
    #[arg(short, long, value_name = "CSV")]
    pub reference: PathBuf,

    /// Current CSV file; when omitted both windows are cut from the reference file
    #[arg(short, long, value_name = "CSV")]
    pub current: Option<PathBuf>,

    /// YAML drift configuration
    #[arg(long, value_name = "YAML", env = "DRIFTWATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Keep only the last N reference rows (365 when --current is omitted)
    #[arg(long, value_name = "N")]
    pub reference_rows: Option<usize>,

    /// Keep only the last N current rows (7 when --current is omitted)
    #[arg(long, value_name = "N")]
    pub current_rows: Option<usize>,

    /// Directory for the report and summary JSON files
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Seed for Wasserstein subsampling (overrides the config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the stats command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct StatsArgs {
    /// CSV file to summarize
    #[arg(value_name = "CSV")]
    pub data: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the config command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct ConfigArgs {
    /// Validate this file instead of printing the defaults
    #[arg(long, value_name = "YAML", conflicts_with = "output")]
    pub validate: Option<PathBuf>,

    /// Write the default configuration here instead of stdout
    #[arg(short, long, value_name = "YAML")]
    pub output: Option<PathBuf>,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {s}. Valid formats: text, json")),
        }
    }
}

/// Parse arguments from an iterator
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
