//! Bounded, append-only log of serialized reports.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::types::Severity;

/// One point of the severity trend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub timestamp: String,
    pub severity: Severity,
    pub drift_detected: bool,
}

/// Past reports in serialized form, oldest first.
///
/// Appends are serialized through a mutex so one engine can be shared by
/// concurrent callers. When `capacity` is reached the oldest entry is
/// evicted.
#[derive(Debug)]
pub struct DriftHistory {
    capacity: usize,
    entries: Mutex<VecDeque<Value>>,
}

impl DriftHistory {
    /// Create a history that keeps at most `capacity` reports (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { capacity, entries: Mutex::new(VecDeque::with_capacity(capacity.min(1024))) }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a serialized report, evicting the oldest when full.
    ///
    /// Anything but a JSON object is dropped with a warning, so a failed
    /// serialization never counts as a run.
    pub fn append(&self, entry: Value) {
        if !entry.is_object() {
            warn!(kind = json_kind(&entry), "Ignoring history entry that is not a report");
            return;
        }
        let mut entries = self.lock();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Snapshot of every retained entry, oldest first
    pub fn entries(&self) -> Vec<Value> {
        self.lock().iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<Value> {
        self.lock().back().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Timestamp, severity and verdict of each retained report
    pub fn severity_trend(&self) -> Vec<TrendPoint> {
        self.lock()
            .iter()
            .map(|entry| TrendPoint {
                timestamp: entry["timestamp"].as_str().unwrap_or_default().to_string(),
                severity: serde_json::from_value(entry["overall_severity"].clone())
                    .unwrap_or_default(),
                drift_detected: entry["drift_detected"].as_bool().unwrap_or(false),
            })
            .collect()
    }

    /// Fraction of retained reports that detected drift
    pub fn drift_rate(&self) -> f64 {
        let entries = self.lock();
        if entries.is_empty() {
            return 0.0;
        }
        let drifted =
            entries.iter().filter(|e| e["drift_detected"].as_bool().unwrap_or(false)).count();
        drifted as f64 / entries.len() as f64
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Value>> {
        // Entries are whole values, so a panicked writer cannot leave one half-written
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Default for DriftHistory {
    fn default() -> Self {
        Self::with_capacity(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    fn entry(n: u32, drift: bool, severity: &str) -> Value {
        json!({
            "timestamp": format!("2024-12-{n:02}T00:00:00Z"),
            "drift_detected": drift,
            "overall_severity": severity,
        })
    }

    #[test]
    fn test_append_and_latest() {
        let history = DriftHistory::with_capacity(10);
        assert!(history.is_empty());
        history.append(entry(1, false, "LOW"));
        history.append(entry(2, true, "HIGH"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().unwrap()["overall_severity"], "HIGH");
    }

    #[test]
    fn test_non_object_entries_are_not_runs() {
        let history = DriftHistory::with_capacity(10);
        history.append(entry(1, true, "HIGH"));
        history.append(Value::Null);
        history.append(json!([1, 2]));

        assert_eq!(history.len(), 1);
        assert_eq!(history.severity_trend().len(), 1);
        assert!((history.drift_rate() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let history = DriftHistory::with_capacity(2);
        for n in 1..=3 {
            history.append(entry(n, false, "LOW"));
        }
        let entries = history.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["timestamp"], "2024-12-02T00:00:00Z");
        assert_eq!(entries[1]["timestamp"], "2024-12-03T00:00:00Z");
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let history = DriftHistory::with_capacity(0);
        history.append(entry(1, false, "LOW"));
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_severity_trend() {
        let history = DriftHistory::default();
        history.append(entry(1, false, "LOW"));
        history.append(entry(2, true, "CRITICAL"));
        let trend = history.severity_trend();
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].severity, Severity::Low);
        assert_eq!(trend[1].severity, Severity::Critical);
        assert!(trend[1].drift_detected);
    }

    #[test]
    fn test_drift_rate() {
        let history = DriftHistory::default();
        assert!((history.drift_rate() - 0.0).abs() < 1e-12);
        history.append(entry(1, true, "HIGH"));
        history.append(entry(2, false, "LOW"));
        history.append(entry(3, false, "LOW"));
        history.append(entry(4, true, "LOW"));
        assert!((history.drift_rate() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_concurrent_appends_are_not_lost() {
        let history = Arc::new(DriftHistory::with_capacity(1000));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let history = Arc::clone(&history);
                std::thread::spawn(move || {
                    for n in 0..25 {
                        history.append(json!({ "thread": t, "n": n }));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(history.len(), 200);
    }
}
