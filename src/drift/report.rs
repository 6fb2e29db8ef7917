//! Drift report: aggregation, severity, and its views.

use std::fmt::Write as _;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use super::types::{DriftTestResult, Severity, TestFamily};
use crate::error::Result;

const RULE_WIDTH: usize = 70;

/// Outcome of one `detect_drift` call.
///
/// Built in a single pass by the engine and read-only afterwards: fields
/// are private and only getters are exposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    timestamp: DateTime<Utc>,
    reference_period: String,
    current_period: String,
    reference_size: usize,
    current_size: usize,
    drift_detected: bool,
    overall_severity: Severity,
    #[serde(with = "column_map")]
    ks_tests: Vec<DriftTestResult>,
    #[serde(with = "column_map")]
    wasserstein_tests: Vec<DriftTestResult>,
    #[serde(with = "column_map")]
    psi_tests: Vec<DriftTestResult>,
    #[serde(with = "column_map")]
    chi_square_tests: Vec<DriftTestResult>,
    missing_columns: Vec<String>,
    #[serde(default)]
    incompatible_columns: Vec<String>,
}

impl DriftReport {
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn reference_period(&self) -> &str {
        &self.reference_period
    }

    pub fn current_period(&self) -> &str {
        &self.current_period
    }

    pub fn reference_size(&self) -> usize {
        self.reference_size
    }

    pub fn current_size(&self) -> usize {
        self.current_size
    }

    /// True iff any test flagged drift or a reference column is missing
    pub fn drift_detected(&self) -> bool {
        self.drift_detected
    }

    pub fn overall_severity(&self) -> Severity {
        self.overall_severity
    }

    /// Reference columns absent from the current snapshot
    pub fn missing_columns(&self) -> &[String] {
        &self.missing_columns
    }

    /// Continuous reference columns that arrived non-numeric
    pub fn incompatible_columns(&self) -> &[String] {
        &self.incompatible_columns
    }

    /// Results of one test family, in reference column order
    pub fn results(&self, family: TestFamily) -> &[DriftTestResult] {
        match family {
            TestFamily::Ks => &self.ks_tests,
            TestFamily::Wasserstein => &self.wasserstein_tests,
            TestFamily::Psi => &self.psi_tests,
            TestFamily::ChiSquare => &self.chi_square_tests,
        }
    }

    /// Result of `family` for `column`, if that test ran
    pub fn result(&self, family: TestFamily, column: &str) -> Option<&DriftTestResult> {
        self.results(family).iter().find(|r| r.column == column)
    }

    /// Every result across families
    pub fn all_results(&self) -> impl Iterator<Item = &DriftTestResult> {
        TestFamily::ALL.into_iter().flat_map(move |family| self.results(family))
    }

    /// Missing columns followed by columns with any flagged test, without duplicates
    pub fn affected_columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = self.missing_columns.clone();
        for result in self.all_results().filter(|r| r.drift_detected) {
            if !columns.contains(&result.column) {
                columns.push(result.column.clone());
            }
        }
        columns
    }

    /// Nested mapping of the whole report.
    ///
    /// Non-finite statistics become `null` and are logged. A serialization
    /// error is logged and yields `Value::Null`, which
    /// [`DriftHistory`](super::DriftHistory) refuses to record.
    pub fn to_dict(&self) -> serde_json::Value {
        for result in self.all_results().filter(|r| !r.statistic.is_finite()) {
            warn!(
                test = %result.test,
                column = %result.column,
                "Non-finite statistic serializes as null"
            );
        }
        match serde_json::to_value(self) {
            Ok(value) => value,
            Err(e) => {
                error!(error = %e, "Failed to convert drift report to a mapping");
                serde_json::Value::Null
            }
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a report previously produced by [`DriftReport::to_json`]
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Human-readable multi-line rendering
    pub fn summary(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut out = String::new();

        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "DATA DRIFT DETECTION REPORT");
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Reference Period: {} ({} records)",
            self.reference_period, self.reference_size
        );
        let _ = writeln!(
            out,
            "Current Period:   {} ({} records)",
            self.current_period, self.current_size
        );
        let _ = writeln!(
            out,
            "Timestamp:        {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
        let _ = writeln!(out);
        let verdict = if self.drift_detected { "DRIFT DETECTED" } else { "NO DRIFT DETECTED" };
        let _ = writeln!(out, "OVERALL VERDICT: {verdict}");
        let _ = writeln!(out, "Severity Level:   {}", self.overall_severity);

        if !self.missing_columns.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Missing Columns ({}):", self.missing_columns.len());
            for column in &self.missing_columns {
                let _ = writeln!(out, "   - {column}");
            }
        }

        if !self.incompatible_columns.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "Incompatible Columns ({}, tests not applicable):",
                self.incompatible_columns.len()
            );
            for column in &self.incompatible_columns {
                let _ = writeln!(out, "   - {column}");
            }
        }

        for family in TestFamily::ALL {
            let results = self.results(family);
            if results.is_empty() {
                continue;
            }
            let _ = writeln!(out);
            let _ = writeln!(out, "{} ({} features):", family.name(), results.len());
            for result in results {
                let status = match (result.drift_detected, result.severity) {
                    (true, Some(band)) => format!("DRIFT ({band})"),
                    (true, None) => "DRIFT".to_string(),
                    (false, _) => "OK".to_string(),
                };
                let _ = writeln!(
                    out,
                    "   {:20} {:15} ({}={:.6})",
                    result.column,
                    status,
                    family.statistic_label(),
                    result.headline_value()
                );
            }
        }

        let _ = writeln!(out);
        out.push_str(&rule);
        out
    }
}

impl std::fmt::Display for DriftReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Single-pass report construction. Only the engine holds one.
#[derive(Debug)]
pub(crate) struct ReportBuilder {
    report: DriftReport,
}

impl ReportBuilder {
    pub(crate) fn new(
        reference_period: impl Into<String>,
        current_period: impl Into<String>,
        reference_size: usize,
        current_size: usize,
    ) -> Self {
        Self {
            report: DriftReport {
                timestamp: Utc::now(),
                reference_period: reference_period.into(),
                current_period: current_period.into(),
                reference_size,
                current_size,
                drift_detected: false,
                overall_severity: Severity::Low,
                ks_tests: Vec::new(),
                wasserstein_tests: Vec::new(),
                psi_tests: Vec::new(),
                chi_square_tests: Vec::new(),
                missing_columns: Vec::new(),
                incompatible_columns: Vec::new(),
            },
        }
    }

    pub(crate) fn add_result(&mut self, result: DriftTestResult) {
        let report = &mut self.report;
        if result.drift_detected {
            report.drift_detected = true;
            if result.test == TestFamily::Psi {
                report.overall_severity = report.overall_severity.escalate(Severity::High);
            }
        }
        match result.test {
            TestFamily::Ks => report.ks_tests.push(result),
            TestFamily::Wasserstein => report.wasserstein_tests.push(result),
            TestFamily::Psi => report.psi_tests.push(result),
            TestFamily::ChiSquare => report.chi_square_tests.push(result),
        }
    }

    pub(crate) fn add_missing_column(&mut self, column: impl Into<String>) {
        let report = &mut self.report;
        report.missing_columns.push(column.into());
        report.drift_detected = true;
        report.overall_severity = report.overall_severity.escalate(Severity::Critical);
    }

    pub(crate) fn add_incompatible_column(&mut self, column: impl Into<String>) {
        self.report.incompatible_columns.push(column.into());
    }

    pub(crate) fn finish(self) -> DriftReport {
        self.report
    }
}

/// Serializes a family's results as an ordered `column -> result` map.
mod column_map {
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::super::types::{DriftTestResult, Severity, TestFamily};

    #[derive(Serialize)]
    struct EntryRef<'a> {
        test: TestFamily,
        statistic: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        p_value: Option<f64>,
        drift_detected: bool,
        interpretation: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        severity: Option<Severity>,
    }

    #[derive(Deserialize)]
    struct Entry {
        test: TestFamily,
        statistic: f64,
        #[serde(default)]
        p_value: Option<f64>,
        drift_detected: bool,
        #[serde(default)]
        severity: Option<Severity>,
    }

    pub(super) fn serialize<S: Serializer>(
        results: &[DriftTestResult],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(results.len()))?;
        for r in results {
            let entry = EntryRef {
                test: r.test,
                statistic: r.statistic,
                p_value: r.p_value,
                drift_detected: r.drift_detected,
                interpretation: r.interpretation(),
                severity: r.severity,
            };
            map.serialize_entry(&r.column, &entry)?;
        }
        map.end()
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<DriftTestResult>, D::Error> {
        struct ColumnMapVisitor;

        impl<'de> Visitor<'de> for ColumnMapVisitor {
            type Value = Vec<DriftTestResult>;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map from column name to test result")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut results = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((column, entry)) = access.next_entry::<String, Entry>()? {
                    results.push(DriftTestResult {
                        test: entry.test,
                        column,
                        statistic: entry.statistic,
                        p_value: entry.p_value,
                        drift_detected: entry.drift_detected,
                        severity: entry.severity,
                    });
                }
                Ok(results)
            }
        }

        deserializer.deserialize_map(ColumnMapVisitor)
    }
}
