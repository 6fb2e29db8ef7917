//! # driftwatch
//!
//! Statistical data drift detection for tabular snapshots.
//!
//! A [`DriftDetectionEngine`] freezes descriptive statistics of a reference
//! dataset once, then compares any number of current snapshots against it:
//!
//! - **Continuous columns** (integer, real): Kolmogorov-Smirnov,
//!   Wasserstein distance, Population Stability Index
//! - **Categorical columns** (boolean, text): Chi-square contingency test
//!
//! Each comparison yields an immutable [`DriftReport`] with a verdict, an
//! ordered severity, per-test results and missing columns.
//!
//! ```no_run
//! use driftwatch::{io::read_csv, DriftConfig, DriftDetectionEngine};
//!
//! let reference = read_csv("data/reference.csv")?;
//! let current = read_csv("data/current.csv")?;
//!
//! let engine = DriftDetectionEngine::new(reference, DriftConfig::default())?;
//! let report = engine.detect_drift(&current);
//! println!("{}", report.summary());
//! # Ok::<(), driftwatch::DriftError>(())
//! ```

pub mod cli;
pub mod config;
pub mod dataset;
pub mod drift;
pub mod error;
pub mod io;
pub mod stats;

pub use config::DriftConfig;
pub use dataset::{Column, ColumnKind, ColumnValues, Dataset};
pub use drift::{DriftDetectionEngine, DriftHistory, DriftReport, DriftTestResult, Severity, TestFamily};
pub use error::{DriftError, Result};
