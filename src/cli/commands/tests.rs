//! CLI command tests

use super::*;
use crate::cli::parse_args;
use crate::config::DriftConfig;
use crate::drift::{summarize, DriftReport};
use crate::error::DriftError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write a price/trend CSV; `offset` shifts every price
fn write_csv(dir: &TempDir, name: &str, rows: usize, offset: f64) -> PathBuf {
    let path = dir.path().join(name);
    let mut text = String::from("price,trend\n");
    for i in 0..rows {
        let trend = ["up", "down", "flat"][i % 3];
        text.push_str(&format!("{},{trend}\n", 100.0 + (i % 20) as f64 + offset));
    }
    std::fs::write(&path, text).unwrap();
    path
}

fn run(args: &[&str]) -> crate::error::Result<RunStatus> {
    let mut argv = vec!["driftwatch"];
    argv.extend_from_slice(args);
    run_command(parse_args(argv).unwrap())
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_exit_codes() {
    assert_eq!(RunStatus::Clean.exit_code(), 0);
    assert_eq!(RunStatus::DriftDetected.exit_code(), 1);
}

#[test]
fn test_check_clean() {
    let dir = TempDir::new().unwrap();
    let reference = write_csv(&dir, "ref.csv", 120, 0.0);
    let current = write_csv(&dir, "cur.csv", 120, 0.0);

    let status = run(&["-q", "check", "-r", path_str(&reference), "-c", path_str(&current)]);
    assert_eq!(status.unwrap(), RunStatus::Clean);
}

#[test]
fn test_check_drift_writes_reports() {
    let dir = TempDir::new().unwrap();
    let reference = write_csv(&dir, "ref.csv", 120, 0.0);
    let current = write_csv(&dir, "cur.csv", 60, 500.0);
    let out = dir.path().join("reports");

    let status = run(&[
        "-q",
        "check",
        "-r",
        path_str(&reference),
        "-c",
        path_str(&current),
        "--output-dir",
        path_str(&out),
        "--seed",
        "3",
    ])
    .unwrap();
    assert_eq!(status, RunStatus::DriftDetected);

    let mut names: Vec<String> = std::fs::read_dir(&out)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names.len(), 2);
    assert!(names[0].starts_with("drift_report_") && names[0].ends_with(".json"));
    assert!(names[1].starts_with("summary_"));

    let report =
        DriftReport::from_json(&std::fs::read_to_string(out.join(&names[0])).unwrap()).unwrap();
    assert!(report.drift_detected());
    assert_eq!(report.reference_size(), 120);
    assert_eq!(report.current_size(), 60);
}

#[test]
fn test_check_single_file_uses_tail_windows() {
    let dir = TempDir::new().unwrap();
    let data = write_csv(&dir, "daily.csv", 400, 0.0);
    let out = dir.path().join("out");

    run(&["-q", "check", "-r", path_str(&data), "-o", path_str(&out)]).unwrap();

    let report_path = std::fs::read_dir(&out)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .find(|p| p.file_name().unwrap().to_string_lossy().starts_with("drift_report_"))
        .unwrap();
    let report = DriftReport::from_json(&std::fs::read_to_string(report_path).unwrap()).unwrap();
    assert_eq!(report.reference_size(), 365);
    assert_eq!(report.current_size(), 7);
}

#[test]
fn test_check_missing_column_is_drift() {
    let dir = TempDir::new().unwrap();
    let reference = write_csv(&dir, "ref.csv", 60, 0.0);
    let current = dir.path().join("cur.csv");
    std::fs::write(&current, "price\n100\n101\n102\n").unwrap();

    let status = run(&["-q", "check", "-r", path_str(&reference), "-c", path_str(&current)]);
    assert_eq!(status.unwrap(), RunStatus::DriftDetected);
}

#[test]
fn test_check_with_config_file() {
    let dir = TempDir::new().unwrap();
    let reference = write_csv(&dir, "ref.csv", 120, 0.0);
    let current = write_csv(&dir, "cur.csv", 60, 0.5);
    let config = dir.path().join("drift.yaml");
    // A tiny offset moves the Wasserstein distance past a strict threshold
    std::fs::write(&config, "threshold_wasserstein: 0.01\nseed: 1\n").unwrap();

    let status = run(&[
        "-q",
        "check",
        "-r",
        path_str(&reference),
        "-c",
        path_str(&current),
        "--config",
        path_str(&config),
    ]);
    assert_eq!(status.unwrap(), RunStatus::DriftDetected);
}

#[test]
fn test_check_errors() {
    let dir = TempDir::new().unwrap();
    let reference = write_csv(&dir, "ref.csv", 10, 0.0);

    let err = run(&["check", "-r", "/nonexistent/ref.csv"]).unwrap_err();
    assert!(matches!(err, DriftError::Io { .. }));

    let missing_config = dir.path().join("missing.yaml");
    let err =
        run(&["check", "-r", path_str(&reference), "--config", path_str(&missing_config)])
            .unwrap_err();
    assert!(matches!(err, DriftError::ConfigNotFound { .. }));

    let empty = dir.path().join("empty.csv");
    std::fs::write(&empty, "price,trend\n").unwrap();
    let err = run(&["check", "-r", path_str(&empty)]).unwrap_err();
    assert!(matches!(err, DriftError::EmptyReference { .. }));
}

#[test]
fn test_stats_runs() {
    let dir = TempDir::new().unwrap();
    let data = write_csv(&dir, "data.csv", 30, 0.0);
    assert_eq!(run(&["-q", "stats", path_str(&data)]).unwrap(), RunStatus::Clean);
    assert_eq!(run(&["stats", path_str(&data), "--format", "json"]).unwrap(), RunStatus::Clean);
}

#[test]
fn test_format_statistic() {
    let dir = TempDir::new().unwrap();
    let data = crate::io::read_csv(write_csv(&dir, "data.csv", 6, 0.0)).unwrap();
    let statistics = summarize(&data);

    let price = super::stats::format_statistic(&statistics[0].0, &statistics[0].1);
    assert!(price.starts_with("price (continuous, 6 values)"));
    assert!(price.contains("mean=102.5000"));

    let trend = super::stats::format_statistic(&statistics[1].0, &statistics[1].1);
    assert!(trend.starts_with("trend (categorical, 6 values)"));
    assert!(trend.contains("3 categories, mode=down"));
    assert!(trend.contains("    up: 2"));
}

#[test]
fn test_config_write_and_validate() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("drift.yaml");

    run(&["-q", "config", "--output", path_str(&path)]).unwrap();
    assert_eq!(DriftConfig::from_file(&path).unwrap(), DriftConfig::default());
    assert_eq!(run(&["-q", "config", "--validate", path_str(&path)]).unwrap(), RunStatus::Clean);

    std::fs::write(&path, "psi_bins: 0\n").unwrap();
    let err = run(&["config", "--validate", path_str(&path)]).unwrap_err();
    assert!(matches!(err, DriftError::ConfigValue { .. }));
}
