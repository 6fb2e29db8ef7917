//! Drift Detection Module
//!
//! Compares current data snapshots against a frozen reference dataset and
//! signals when the process has moved away from it:
//! - Kolmogorov-Smirnov test, Wasserstein distance and Population Stability
//!   Index (continuous features)
//! - Chi-square test (categorical features)
//!
//! Every run yields an immutable [`DriftReport`]; a serialized copy is kept
//! in the engine's bounded [`DriftHistory`].

mod engine;
mod history;
mod report;
mod statistics;
mod types;


pub use engine::DriftDetectionEngine;
pub use history::{DriftHistory, TrendPoint};
pub use report::DriftReport;
pub use statistics::{
    category_counts, quantile, summarize, summarize_column, CategoricalStatistics,
    ContinuousStatistics, ReferenceColumnStatistic,
};
pub use types::{DriftTestResult, Severity, TestFamily};
