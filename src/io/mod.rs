//! Reading snapshots from disk and persisting run artifacts.

mod csv;
mod writer;

pub use self::csv::{parse_csv, read_csv};
pub use writer::{AlertLevel, DriftAlert, ReportWriter, RunSummary, TestsRun, WrittenReport};
