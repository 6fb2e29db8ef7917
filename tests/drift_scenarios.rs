//! End-to-end drift scenarios: CSV snapshots in, reports and alerts out.

use driftwatch::io::{read_csv, AlertLevel, DriftAlert, ReportWriter, RunSummary};
use driftwatch::{Dataset, DriftConfig, DriftDetectionEngine, DriftReport, Severity, TestFamily};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// =============================================================================
// Fixtures
// =============================================================================

const TRENDS: [&str; 3] = ["up", "down", "sideways"];

/// Daily market rows: price ~ Normal(45000, 5000) plus `shift`, cyclic trend
fn write_market_csv(path: &Path, rows: usize, seed: u64, shift: f64, with_trend: bool) {
    let mut rng = StdRng::seed_from_u64(seed);
    let price = Normal::new(45_000.0, 5_000.0).unwrap();

    let header = if with_trend { "btc_price,volume,trend\n" } else { "btc_price,volume\n" };
    let mut text = String::from(header);
    for i in 0..rows {
        let p = price.sample(&mut rng) + shift;
        let volume = 20_000 + (i * 131) % 5_000;
        if with_trend {
            text.push_str(&format!("{p:.2},{volume},{}\n", TRENDS[i % 3]));
        } else {
            text.push_str(&format!("{p:.2},{volume}\n"));
        }
    }
    std::fs::write(path, text).unwrap();
}

fn snapshot(dir: &TempDir, name: &str, rows: usize, seed: u64, shift: f64, trend: bool) -> Dataset {
    let path: PathBuf = dir.path().join(name);
    write_market_csv(&path, rows, seed, shift, trend);
    read_csv(&path).unwrap()
}

fn engine(reference: Dataset) -> DriftDetectionEngine {
    let config = DriftConfig::default().with_seed(2024).with_reference_period("Last 365 days");
    DriftDetectionEngine::new(reference, config).unwrap()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_shifted_prices_raise_high_severity() {
    let dir = TempDir::new().unwrap();
    let reference = snapshot(&dir, "ref.csv", 365, 1, 0.0, true);
    let current = snapshot(&dir, "cur.csv", 365, 1, 5_000.0, true);
    let engine = engine(reference);

    let report = engine.detect_drift(&current);
    let psi = report.result(TestFamily::Psi, "btc_price").unwrap();
    assert!(psi.statistic > 0.25);
    assert_eq!(psi.severity, Some(Severity::High));
    assert!(report.result(TestFamily::Ks, "btc_price").unwrap().p_value.unwrap() < 0.05);
    assert!(report.drift_detected());
    assert_eq!(report.overall_severity(), Severity::High);

    let alert = DriftAlert::from_report(&report).unwrap();
    assert_eq!(alert.level, AlertLevel::Critical);
    assert!(alert.features_affected.contains(&"btc_price".to_string()));
}

#[test]
fn test_missing_trend_is_critical() {
    let dir = TempDir::new().unwrap();
    let reference = snapshot(&dir, "ref.csv", 365, 5, 0.0, true);
    let current = snapshot(&dir, "cur.csv", 7, 6, 0.0, false);
    let engine = engine(reference);

    let report = engine.detect_drift(&current);
    assert_eq!(report.missing_columns(), ["trend".to_string()]);
    assert_eq!(report.overall_severity(), Severity::Critical);
    assert!(report.summary().contains("Missing Columns (1):"));
}

#[test]
fn test_same_trend_mix_does_not_drift() {
    let dir = TempDir::new().unwrap();
    let reference = snapshot(&dir, "ref.csv", 90, 8, 0.0, true);
    let current = snapshot(&dir, "cur.csv", 45, 9, 0.0, true);
    let engine = engine(reference);

    let report = engine.detect_drift(&current);
    let chi = report.result(TestFamily::ChiSquare, "trend").unwrap();
    assert!(chi.p_value.unwrap() > 0.05);
    assert!(!chi.drift_detected);
}

#[test]
fn test_daily_job_artifacts() {
    let dir = TempDir::new().unwrap();
    let reference = snapshot(&dir, "ref.csv", 365, 1, 0.0, true);
    let current = snapshot(&dir, "cur.csv", 30, 2, 8_000.0, true);
    let engine = engine(reference);
    let report = engine.detect_drift(&current);

    let written = ReportWriter::new(dir.path().join("reports")).write(&report).unwrap();

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&written.report_path).unwrap()).unwrap();
    assert_eq!(saved["reference_period"], "Last 365 days");
    assert_eq!(saved["reference_size"], 365);
    assert_eq!(saved["current_size"], 30);
    assert_eq!(saved["overall_severity"], "HIGH");
    assert_eq!(saved["psi_tests"]["btc_price"]["interpretation"], "DRIFT");
    assert!(saved["chi_square_tests"]["trend"]["p_value"].is_number());
    assert_eq!(DriftReport::from_json(&saved.to_string()).unwrap(), report);

    let summary: RunSummary =
        serde_json::from_str(&std::fs::read_to_string(&written.summary_path).unwrap()).unwrap();
    assert!(summary.drift_detected);
    assert_eq!(summary.tests_run.ks_tests, 2);
    assert_eq!(summary.tests_run.chi_square_tests, 1);
    assert!(summary.features_affected.contains(&"btc_price".to_string()));
}

#[test]
fn test_history_tracks_consecutive_runs() {
    let dir = TempDir::new().unwrap();
    let reference = snapshot(&dir, "ref.csv", 365, 1, 0.0, true);
    let engine = engine(reference.clone());

    engine.detect_drift(&reference);
    engine.detect_drift(&snapshot(&dir, "gap.csv", 7, 3, 0.0, false));

    let trend = engine.history().severity_trend();
    assert_eq!(trend.len(), 2);
    assert_eq!(trend[0].severity, Severity::Low);
    assert!(!trend[0].drift_detected);
    assert_eq!(trend[1].severity, Severity::Critical);
    assert!((engine.history().drift_rate() - 0.5).abs() < 1e-12);
}
