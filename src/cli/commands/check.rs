//! Check command implementation

use tracing::{info, warn};

use super::RunStatus;
use crate::cli::{CheckArgs, OutputFormat};
use crate::config::DriftConfig;
use crate::dataset::Dataset;
use crate::drift::DriftDetectionEngine;
use crate::error::Result;
use crate::io::{read_csv, DriftAlert, ReportWriter};

/// Reference window when both windows come from one file
pub const DEFAULT_REFERENCE_ROWS: usize = 365;
/// Current window when both windows come from one file
pub const DEFAULT_CURRENT_ROWS: usize = 7;

pub fn run_check(args: CheckArgs, quiet: bool) -> Result<RunStatus> {
    let mut config = match &args.config {
        Some(path) => DriftConfig::from_file(path)?,
        None => DriftConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let (reference, current) = load_windows(&args)?;
    info!(
        reference_rows = reference.n_rows(),
        current_rows = current.n_rows(),
        "Running drift detection"
    );

    let engine = DriftDetectionEngine::new(reference, config)?;
    let report = engine.detect_drift(&current);

    if let Some(dir) = &args.output_dir {
        ReportWriter::new(dir).write(&report)?;
    }

    match args.format {
        OutputFormat::Text => {
            if !quiet {
                println!("{}", report.summary());
            }
        }
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    match DriftAlert::from_report(&report) {
        Some(alert) => {
            warn!(level = %alert.level, features = ?alert.features_affected, "{}", alert.message);
            Ok(RunStatus::DriftDetected)
        }
        None => Ok(RunStatus::Clean),
    }
}

/// Reference and current windows.
///
/// With `--current`, each file is optionally cut to its row limit. Without
/// it, both windows are the tails of the reference file.
fn load_windows(args: &CheckArgs) -> Result<(Dataset, Dataset)> {
    let data = read_csv(&args.reference)?;
    match &args.current {
        Some(path) => {
            let current = read_csv(path)?;
            Ok((keep_last(data, args.reference_rows), keep_last(current, args.current_rows)))
        }
        None => {
            let reference = data.tail(args.reference_rows.unwrap_or(DEFAULT_REFERENCE_ROWS));
            let current = data.tail(args.current_rows.unwrap_or(DEFAULT_CURRENT_ROWS));
            Ok((reference, current))
        }
    }
}

fn keep_last(data: Dataset, rows: Option<usize>) -> Dataset {
    match rows {
        Some(n) => data.tail(n),
        None => data,
    }
}
