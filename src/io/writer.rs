//! Persisted run artifacts: the full report, a run summary and an alert.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::drift::{DriftReport, Severity, TestFamily};
use crate::error::{DriftError, Result};

const FILE_TIMESTAMP: &str = "%Y%m%d_%H%M%S";

/// Number of results per test family in one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestsRun {
    pub ks_tests: usize,
    pub psi_tests: usize,
    pub wasserstein_tests: usize,
    pub chi_square_tests: usize,
}

/// Condensed view of a run for downstream jobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub timestamp: DateTime<Utc>,
    pub drift_detected: bool,
    pub severity: Severity,
    pub reference_size: usize,
    pub current_size: usize,
    pub tests_run: TestsRun,
    /// Columns whose PSI flagged drift
    pub features_affected: Vec<String>,
}

impl RunSummary {
    pub fn from_report(report: &DriftReport) -> Self {
        Self {
            timestamp: report.timestamp(),
            drift_detected: report.drift_detected(),
            severity: report.overall_severity(),
            reference_size: report.reference_size(),
            current_size: report.current_size(),
            tests_run: TestsRun {
                ks_tests: report.results(TestFamily::Ks).len(),
                psi_tests: report.results(TestFamily::Psi).len(),
                wasserstein_tests: report.results(TestFamily::Wasserstein).len(),
                chi_square_tests: report.results(TestFamily::ChiSquare).len(),
            },
            features_affected: report
                .results(TestFamily::Psi)
                .iter()
                .filter(|r| r.drift_detected)
                .map(|r| r.column.clone())
                .collect(),
        }
    }
}

/// Alert level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertLevel {
    Warning,
    Critical,
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertLevel::Warning => write!(f, "WARNING"),
            AlertLevel::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Notification payload for a run that detected drift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftAlert {
    pub level: AlertLevel,
    pub message: String,
    pub severity: Severity,
    pub features_affected: Vec<String>,
    pub action_required: bool,
}

impl DriftAlert {
    /// `None` without drift; `CRITICAL` at HIGH severity or above, else `WARNING`
    pub fn from_report(report: &DriftReport) -> Option<Self> {
        if !report.drift_detected() {
            return None;
        }
        let severity = report.overall_severity();
        let level = if severity >= Severity::High { AlertLevel::Critical } else { AlertLevel::Warning };
        Some(Self {
            level,
            message: format!("Data drift detected with {severity} severity"),
            severity,
            features_affected: report.affected_columns(),
            action_required: true,
        })
    }
}

/// Paths of the files produced by [`ReportWriter::write`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReport {
    pub report_path: PathBuf,
    pub summary_path: PathBuf,
}

/// Writes timestamped report and summary JSON files into one directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `drift_report_<ts>.json` and `summary_<ts>.json`.
    ///
    /// The directory is created if needed. `<ts>` is the report timestamp
    /// as `YYYYmmdd_HHMMSS`, so two runs within the same second overwrite
    /// each other.
    pub fn write(&self, report: &DriftReport) -> Result<WrittenReport> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            DriftError::io(format!("Failed to create report directory {}", self.dir.display()), e)
        })?;

        let stamp = report.timestamp().format(FILE_TIMESTAMP).to_string();
        let report_path = self.dir.join(format!("drift_report_{stamp}.json"));
        let summary_path = self.dir.join(format!("summary_{stamp}.json"));

        write_file(&report_path, &report.to_json()?)?;
        let summary = serde_json::to_string_pretty(&RunSummary::from_report(report))?;
        write_file(&summary_path, &summary)?;

        info!(report = %report_path.display(), "Report saved");
        Ok(WrittenReport { report_path, summary_path })
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents)
        .map_err(|e| DriftError::io(format!("Failed to write {}", path.display()), e))
}
