//! Driftwatch CLI
//!
//! Compares data snapshots against a reference and reports distribution drift.
//!
//! # Usage
//!
//! ```bash
//! # Last 365 rows as reference, last 7 as current
//! driftwatch check --reference data/btc_daily.csv --output-dir reports/
//!
//! # Two separate snapshots, JSON report on stdout
//! driftwatch check --reference ref.csv --current today.csv --format json
//!
//! # Reference statistics
//! driftwatch stats data/btc_daily.csv
//!
//! # Default configuration
//! driftwatch config --output drift.yaml
//! ```
//!
//! Exit status: 0 no drift, 1 drift detected, 2 error.

use clap::Parser;
use driftwatch::cli::{init_logging, run_command, Cli};
use std::process::ExitCode;

const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.quiet) {
        eprintln!("Warning: logging disabled: {e}");
    }

    match run_command(cli) {
        Ok(status) => ExitCode::from(status.exit_code()),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
