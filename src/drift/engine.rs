//! Drift detection engine.

use std::collections::HashMap;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::history::DriftHistory;
use super::report::{DriftReport, ReportBuilder};
use super::statistics::{category_counts, summarize, ReferenceColumnStatistic};
use super::types::{DriftTestResult, TestFamily};
use crate::config::DriftConfig;
use crate::dataset::Dataset;
use crate::error::{DriftError, Result};
use crate::stats::{
    chi_square_contingency, ks_two_sample, population_stability_index, wasserstein_distance,
};

/// What happened to one reference column during a detection run
#[derive(Debug)]
enum ColumnOutcome {
    Missing,
    Incompatible,
    Tested(Vec<DriftTestResult>),
}

/// Compares current snapshots against a frozen reference.
///
/// Reference statistics are computed once in [`DriftDetectionEngine::new`]
/// and never change. [`DriftDetectionEngine::detect_drift`] takes `&self`,
/// so one engine can serve concurrent callers; only the history is shared
/// mutable state.
#[derive(Debug)]
pub struct DriftDetectionEngine {
    config: DriftConfig,
    reference_size: usize,
    statistics: Vec<(String, ReferenceColumnStatistic)>,
    index: HashMap<String, usize>,
    history: DriftHistory,
}

impl DriftDetectionEngine {
    /// Summarize `reference` and build an engine.
    ///
    /// Fails on an invalid config or a reference with no rows or no columns.
    pub fn new(reference: Dataset, config: DriftConfig) -> Result<Self> {
        config.validate()?;
        if reference.is_empty() {
            return Err(DriftError::EmptyReference {
                rows: reference.n_rows(),
                columns: reference.n_columns(),
            });
        }

        let statistics = summarize(&reference);
        let index = statistics.iter().enumerate().map(|(i, (name, _))| (name.clone(), i)).collect();
        let history = DriftHistory::with_capacity(config.history_capacity);

        info!(
            records = reference.n_rows(),
            columns = reference.n_columns(),
            "Drift detection engine initialized"
        );

        Ok(Self { config, reference_size: reference.n_rows(), statistics, index, history })
    }

    pub fn config(&self) -> &DriftConfig {
        &self.config
    }

    /// Number of rows in the reference dataset
    pub fn reference_size(&self) -> usize {
        self.reference_size
    }

    /// Frozen statistics, in reference column order
    pub fn reference_statistics(&self) -> &[(String, ReferenceColumnStatistic)] {
        &self.statistics
    }

    /// Statistics of one reference column
    pub fn statistic(&self, column: &str) -> Option<&ReferenceColumnStatistic> {
        self.index.get(column).map(|&i| &self.statistics[i].1)
    }

    pub fn history(&self) -> &DriftHistory {
        &self.history
    }

    /// Run every applicable test on every reference column.
    ///
    /// The current period is labelled with the current UTC time.
    pub fn detect_drift(&self, current: &Dataset) -> DriftReport {
        self.detect_drift_with_label(current, Utc::now().to_rfc3339())
    }

    /// [`detect_drift`](Self::detect_drift) with an explicit current-period label
    pub fn detect_drift_with_label(
        &self,
        current: &Dataset,
        current_period: impl Into<String>,
    ) -> DriftReport {
        let outcomes = self.evaluate_columns(current);

        let mut builder = ReportBuilder::new(
            self.config.reference_period.clone(),
            current_period,
            self.reference_size,
            current.n_rows(),
        );
        for ((name, _), outcome) in self.statistics.iter().zip(outcomes) {
            match outcome {
                ColumnOutcome::Missing => builder.add_missing_column(name.clone()),
                ColumnOutcome::Incompatible => builder.add_incompatible_column(name.clone()),
                ColumnOutcome::Tested(results) => {
                    for result in results {
                        builder.add_result(result);
                    }
                }
            }
        }
        let report = builder.finish();

        if report.drift_detected() {
            warn!(
                severity = %report.overall_severity(),
                affected = ?report.affected_columns(),
                "Drift detected"
            );
        } else {
            info!(current_size = current.n_rows(), "No drift detected");
        }

        self.history.append(report.to_dict());
        report
    }

    /// KS statistic and p-value for `column`; `None` when not applicable
    pub fn ks_test(&self, current: &Dataset, column: &str) -> Option<(f64, f64)> {
        let (_, reference, values) = self.continuous_pair(TestFamily::Ks, current, column)?;
        ks_two_sample(reference, &values)
    }

    /// Wasserstein distance for `column`; `None` when not applicable
    pub fn wasserstein_distance(&self, current: &Dataset, column: &str) -> Option<f64> {
        let (idx, reference, values) =
            self.continuous_pair(TestFamily::Wasserstein, current, column)?;
        wasserstein_distance(reference, &values, &mut self.column_rng(idx))
    }

    /// PSI for `column`; `None` when not applicable
    pub fn population_stability_index(&self, current: &Dataset, column: &str) -> Option<f64> {
        let (_, reference, values) = self.continuous_pair(TestFamily::Psi, current, column)?;
        population_stability_index(reference, &values, self.config.psi_bins)
    }

    /// Chi-square statistic and p-value for `column`; `None` when not applicable
    pub fn chi_square_test(&self, current: &Dataset, column: &str) -> Option<(f64, f64)> {
        let (_, stat) = self.applicable(TestFamily::ChiSquare, column)?;
        let reference = stat.as_categorical()?;
        let counts = category_counts(current.column(column)?.values().categories());
        chi_square_contingency(&reference.counts, &counts).map(|o| (o.statistic, o.p_value))
    }

    #[cfg(feature = "parallel")]
    fn evaluate_columns(&self, current: &Dataset) -> Vec<ColumnOutcome> {
        self.statistics
            .par_iter()
            .enumerate()
            .map(|(idx, (name, stat))| self.evaluate_column(idx, name, stat, current))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_columns(&self, current: &Dataset) -> Vec<ColumnOutcome> {
        self.statistics
            .iter()
            .enumerate()
            .map(|(idx, (name, stat))| self.evaluate_column(idx, name, stat, current))
            .collect()
    }

    fn evaluate_column(
        &self,
        idx: usize,
        name: &str,
        stat: &ReferenceColumnStatistic,
        current: &Dataset,
    ) -> ColumnOutcome {
        let Some(column) = current.column(name) else {
            debug!(column = name, "Reference column missing from current snapshot");
            return ColumnOutcome::Missing;
        };

        match stat {
            ReferenceColumnStatistic::Continuous(reference) => {
                let Some(values) = column.values().numeric() else {
                    warn!(
                        column = name,
                        dtype = column.values().dtype(),
                        "Continuous reference column is not numeric in current snapshot"
                    );
                    return ColumnOutcome::Incompatible;
                };
                ColumnOutcome::Tested(self.continuous_tests(idx, name, &reference.values, &values))
            }
            ReferenceColumnStatistic::Categorical(reference) => {
                let counts = category_counts(column.values().categories());
                match chi_square_contingency(&reference.counts, &counts) {
                    Some(outcome) => ColumnOutcome::Tested(vec![DriftTestResult::chi_square(
                        name,
                        outcome.statistic,
                        outcome.p_value,
                        self.config.threshold_ks,
                    )]),
                    None => {
                        debug!(column = name, "Chi-square contingency table is degenerate");
                        ColumnOutcome::Tested(Vec::new())
                    }
                }
            }
        }
    }

    fn continuous_tests(
        &self,
        idx: usize,
        name: &str,
        reference: &[f64],
        current: &[f64],
    ) -> Vec<DriftTestResult> {
        let config = &self.config;
        let mut results = Vec::with_capacity(3);

        if let Some((statistic, p_value)) = ks_two_sample(reference, current) {
            results.push(DriftTestResult::ks(name, statistic, p_value, config.threshold_ks));
        }
        if let Some(distance) = wasserstein_distance(reference, current, &mut self.column_rng(idx))
        {
            results.push(DriftTestResult::wasserstein(
                name,
                distance,
                config.threshold_wasserstein,
            ));
        }
        if let Some(psi) = population_stability_index(reference, current, config.psi_bins) {
            results.push(DriftTestResult::psi(name, psi, config.threshold_psi));
        }

        if results.is_empty() {
            debug!(column = name, "Too few values for continuous tests");
        }
        results
    }

    /// Index and frozen statistic of `column` when `family` examines its kind
    fn applicable(
        &self,
        family: TestFamily,
        column: &str,
    ) -> Option<(usize, &ReferenceColumnStatistic)> {
        let idx = *self.index.get(column)?;
        let stat = &self.statistics[idx].1;
        family.applies_to(stat.kind()).then_some((idx, stat))
    }

    /// Continuous reference values and numeric current values of `column`
    fn continuous_pair<'a>(
        &'a self,
        family: TestFamily,
        current: &Dataset,
        column: &str,
    ) -> Option<(usize, &'a [f64], Vec<f64>)> {
        let (idx, stat) = self.applicable(family, column)?;
        let reference = stat.as_continuous()?;
        let values = current.column(column).and_then(|c| c.values().numeric())?;
        Some((idx, &reference.values, values))
    }

    /// Per-column generator so results do not depend on evaluation order
    fn column_rng(&self, idx: usize) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(idx as u64)),
            None => StdRng::from_os_rng(),
        }
    }
}
