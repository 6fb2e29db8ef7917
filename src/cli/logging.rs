//! Logging setup for the binary.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the `-v`/`-q` derived filter
pub const LOG_ENV: &str = "DRIFTWATCH_LOG";

/// Map verbosity flags to a level: quiet=ERROR, 0=INFO, 1=DEBUG, 2+=TRACE
pub fn level_filter(verbose: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::INFO,
        (false, 1) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    }
}

/// Install a stderr `fmt` subscriber.
///
/// `DRIFTWATCH_LOG` (an `EnvFilter` directive) wins over the flags when set.
/// Fails if a global subscriber is already installed.
pub fn init_logging(
    verbose: u8,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = EnvFilter::builder()
        .with_default_directive(level_filter(verbose, quiet).into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
}
