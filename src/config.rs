//! Drift engine configuration.
//!
//! Every tunable the engine reads lives here and is passed in at
//! construction; nothing is read from process-wide state.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DriftError, Result};

/// Configuration for [`DriftDetectionEngine`](crate::drift::DriftDetectionEngine)
///
/// Loadable from YAML; omitted keys fall back to [`Default`].
///
/// ```yaml
/// threshold_ks: 0.05
/// threshold_psi: 0.25
/// threshold_wasserstein: 0.1
/// psi_bins: 10
/// seed: 42
/// history_capacity: 1000
/// reference_period: "Last 365 days"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriftConfig {
    /// p-value below which KS and Chi-square flag drift
    pub threshold_ks: f64,
    /// PSI above which drift is flagged
    pub threshold_psi: f64,
    /// Wasserstein distance above which drift is flagged (in column units)
    pub threshold_wasserstein: f64,
    /// Number of equal-width PSI bins
    pub psi_bins: usize,
    /// Seed for Wasserstein subsampling; `None` draws from OS entropy
    pub seed: Option<u64>,
    /// Maximum number of reports retained in history
    pub history_capacity: usize,
    /// Label for the reference period
    pub reference_period: String,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            threshold_ks: 0.05,
            threshold_psi: 0.25,
            threshold_wasserstein: 0.1,
            psi_bins: 10,
            seed: None,
            history_capacity: 1000,
            reference_period: "reference".to_string(),
        }
    }
}

impl DriftConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DriftError::ConfigNotFound { path: path.to_path_buf() });
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| DriftError::io(format!("reading {}", path.display()), e))?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| {
            DriftError::ConfigParsing { path: path.to_path_buf(), message: e.to_string() }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Render as YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| DriftError::Serialization { message: e.to_string() })
    }

    pub fn with_threshold_ks(mut self, threshold: f64) -> Self {
        self.threshold_ks = threshold;
        self
    }

    pub fn with_threshold_psi(mut self, threshold: f64) -> Self {
        self.threshold_psi = threshold;
        self
    }

    pub fn with_threshold_wasserstein(mut self, threshold: f64) -> Self {
        self.threshold_wasserstein = threshold;
        self
    }

    pub fn with_psi_bins(mut self, bins: usize) -> Self {
        self.psi_bins = bins;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn with_reference_period(mut self, label: impl Into<String>) -> Self {
        self.reference_period = label.into();
        self
    }

    /// Check every field is in range
    pub fn validate(&self) -> Result<()> {
        if !(self.threshold_ks > 0.0 && self.threshold_ks < 1.0) {
            return Err(value_error(
                "threshold_ks",
                format!("{} is not a probability in (0, 1)", self.threshold_ks),
                "Use a significance level such as 0.05",
            ));
        }
        if !(self.threshold_psi.is_finite() && self.threshold_psi > 0.0) {
            return Err(value_error(
                "threshold_psi",
                format!("{} must be a positive number", self.threshold_psi),
                "0.25 is the conventional threshold for a significant population shift",
            ));
        }
        if !(self.threshold_wasserstein.is_finite() && self.threshold_wasserstein >= 0.0) {
            return Err(value_error(
                "threshold_wasserstein",
                format!("{} must be a non-negative number", self.threshold_wasserstein),
                "Express the threshold in the units of the monitored columns",
            ));
        }
        if self.psi_bins == 0 {
            return Err(value_error("psi_bins", "must be at least 1", "Use the default of 10"));
        }
        if self.history_capacity == 0 {
            return Err(value_error(
                "history_capacity",
                "must be at least 1",
                "Keep at least the latest report, e.g. 1000",
            ));
        }
        Ok(())
    }
}

fn value_error(field: &str, message: impl Into<String>, suggestion: &str) -> DriftError {
    DriftError::ConfigValue {
        field: field.to_string(),
        message: message.into(),
        suggestion: suggestion.to_string(),
    }
}
