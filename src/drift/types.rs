//! Type definitions for drift detection.

use serde::{Deserialize, Serialize};

use crate::dataset::ColumnKind;

/// Statistical test family
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestFamily {
    /// Kolmogorov-Smirnov test (continuous features)
    Ks,
    /// Wasserstein distance (continuous features)
    Wasserstein,
    /// Population Stability Index (continuous features)
    Psi,
    /// Chi-square test (categorical features)
    ChiSquare,
}

impl TestFamily {
    /// All families in report order
    pub const ALL: [TestFamily; 4] =
        [TestFamily::Ks, TestFamily::Wasserstein, TestFamily::Psi, TestFamily::ChiSquare];

    /// Get the name of this test
    pub fn name(&self) -> &'static str {
        match self {
            TestFamily::Ks => "Kolmogorov-Smirnov",
            TestFamily::Wasserstein => "Wasserstein Distance",
            TestFamily::Psi => "Population Stability Index",
            TestFamily::ChiSquare => "Chi-Square",
        }
    }

    /// Label of the raw statistic in summaries
    pub fn statistic_label(&self) -> &'static str {
        match self {
            TestFamily::Ks | TestFamily::ChiSquare => "p",
            TestFamily::Wasserstein => "dist",
            TestFamily::Psi => "PSI",
        }
    }

    /// Whether this family examines columns of `kind`
    pub fn applies_to(&self, kind: ColumnKind) -> bool {
        match self {
            TestFamily::Ks | TestFamily::Wasserstein | TestFamily::Psi => {
                kind == ColumnKind::Continuous
            }
            TestFamily::ChiSquare => kind == ColumnKind::Categorical,
        }
    }
}

impl std::fmt::Display for TestFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered severity scale
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// PSI interpretation band: < 0.10 low, < 0.25 medium, else high
    pub fn from_psi(psi: f64) -> Self {
        if psi < 0.10 {
            Severity::Low
        } else if psi < 0.25 {
            Severity::Medium
        } else {
            Severity::High
        }
    }

    /// Raise to at least `floor`; never lowers
    pub fn escalate(self, floor: Severity) -> Self {
        self.max(floor)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "LOW"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::High => write!(f, "HIGH"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Outcome of one test family on one column
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriftTestResult {
    /// Test used for detection
    pub test: TestFamily,
    /// Column name
    pub column: String,
    /// KS statistic, Wasserstein distance, PSI value or chi-square statistic
    pub statistic: f64,
    /// P-value (KS and Chi-square only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p_value: Option<f64>,
    /// Whether drift was detected
    pub drift_detected: bool,
    /// PSI interpretation band (PSI only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

impl DriftTestResult {
    pub fn ks(column: impl Into<String>, statistic: f64, p_value: f64, threshold: f64) -> Self {
        Self {
            test: TestFamily::Ks,
            column: column.into(),
            statistic,
            p_value: Some(p_value),
            drift_detected: p_value < threshold,
            severity: None,
        }
    }

    pub fn wasserstein(column: impl Into<String>, distance: f64, threshold: f64) -> Self {
        Self {
            test: TestFamily::Wasserstein,
            column: column.into(),
            statistic: distance,
            p_value: None,
            drift_detected: distance > threshold,
            severity: None,
        }
    }

    pub fn psi(column: impl Into<String>, psi: f64, threshold: f64) -> Self {
        Self {
            test: TestFamily::Psi,
            column: column.into(),
            statistic: psi,
            p_value: None,
            drift_detected: psi > threshold,
            severity: Some(Severity::from_psi(psi)),
        }
    }

    pub fn chi_square(
        column: impl Into<String>,
        statistic: f64,
        p_value: f64,
        threshold: f64,
    ) -> Self {
        Self {
            test: TestFamily::ChiSquare,
            column: column.into(),
            statistic,
            p_value: Some(p_value),
            drift_detected: p_value < threshold,
            severity: None,
        }
    }

    /// `DRIFT` or `NO_DRIFT`
    pub fn interpretation(&self) -> &'static str {
        if self.drift_detected {
            "DRIFT"
        } else {
            "NO_DRIFT"
        }
    }

    /// The number shown in summaries: p-value when present, else the statistic
    pub fn headline_value(&self) -> f64 {
        self.p_value.unwrap_or(self.statistic)
    }
}
