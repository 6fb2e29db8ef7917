//! CLI command implementations

mod check;
mod config;
mod stats;

#[cfg(test)]
mod tests;

use crate::cli::{Cli, Command};
use crate::error::Result;

/// How a successful command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Nothing to report
    Clean,
    /// `check` found drift
    DriftDetected,
}

impl RunStatus {
    /// Process exit code: 0 clean, 1 drift. Errors exit with 2.
    pub fn exit_code(self) -> u8 {
        match self {
            RunStatus::Clean => 0,
            RunStatus::DriftDetected => 1,
        }
    }
}

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<RunStatus> {
    match cli.command {
        Command::Check(args) => check::run_check(args, cli.quiet),
        Command::Stats(args) => stats::run_stats(args, cli.quiet),
        Command::Config(args) => config::run_config(args, cli.quiet),
    }
}
