//! CLI module for driftwatch
//!
//! Argument parsing, command handlers and logging setup for the
//! `driftwatch` binary.

mod args;
mod commands;
mod logging;

pub use args::{parse_args, CheckArgs, Cli, Command, ConfigArgs, OutputFormat, StatsArgs};
pub use commands::{run_command, RunStatus};
pub use logging::{init_logging, level_filter};
