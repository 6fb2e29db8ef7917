//! Reference statistics, computed once per engine.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dataset::{ColumnKind, ColumnValues, Dataset};

/// Descriptive statistics of a continuous reference column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinuousStatistics {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1)
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub q25: f64,
    pub q75: f64,
    /// Non-missing values in their original order, kept for the sample-based tests
    #[serde(skip)]
    pub values: Vec<f64>,
}

/// Category histogram of a categorical reference column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalStatistics {
    pub count: usize,
    pub unique_values: usize,
    /// Most frequent category; ties go to the lexically smallest
    pub mode: Option<String>,
    pub counts: BTreeMap<String, usize>,
}

/// Frozen statistics of one reference column, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReferenceColumnStatistic {
    Continuous(ContinuousStatistics),
    Categorical(CategoricalStatistics),
}

impl ReferenceColumnStatistic {
    pub fn kind(&self) -> ColumnKind {
        match self {
            ReferenceColumnStatistic::Continuous(_) => ColumnKind::Continuous,
            ReferenceColumnStatistic::Categorical(_) => ColumnKind::Categorical,
        }
    }

    pub fn as_continuous(&self) -> Option<&ContinuousStatistics> {
        match self {
            ReferenceColumnStatistic::Continuous(stats) => Some(stats),
            ReferenceColumnStatistic::Categorical(_) => None,
        }
    }

    pub fn as_categorical(&self) -> Option<&CategoricalStatistics> {
        match self {
            ReferenceColumnStatistic::Categorical(stats) => Some(stats),
            ReferenceColumnStatistic::Continuous(_) => None,
        }
    }
}

/// Summarize every column of `dataset`, in column order
pub fn summarize(dataset: &Dataset) -> Vec<(String, ReferenceColumnStatistic)> {
    dataset
        .columns()
        .iter()
        .map(|column| (column.name().to_string(), summarize_column(column.values())))
        .collect()
}

/// Classify a column and compute its statistics
pub fn summarize_column(values: &ColumnValues) -> ReferenceColumnStatistic {
    match (ColumnKind::classify(values), values.numeric()) {
        (ColumnKind::Continuous, Some(numeric)) => {
            ReferenceColumnStatistic::Continuous(continuous_statistics(numeric))
        }
        _ => ReferenceColumnStatistic::Categorical(categorical_statistics(values.categories())),
    }
}

fn continuous_statistics(values: Vec<f64>) -> ContinuousStatistics {
    let count = values.len();
    let mut sorted = values.clone();
    sorted.sort_by(f64::total_cmp);

    let mean = if count == 0 { f64::NAN } else { values.iter().sum::<f64>() / count as f64 };
    let std = if count < 2 {
        f64::NAN
    } else {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    };

    ContinuousStatistics {
        count,
        mean,
        std,
        min: sorted.first().copied().unwrap_or(f64::NAN),
        max: sorted.last().copied().unwrap_or(f64::NAN),
        median: quantile(&sorted, 0.5),
        q25: quantile(&sorted, 0.25),
        q75: quantile(&sorted, 0.75),
        values,
    }
}

fn categorical_statistics(categories: Vec<String>) -> CategoricalStatistics {
    let count = categories.len();
    let counts = category_counts(categories);
    // BTreeMap iterates in lexical order, so the first maximum wins ties
    let mode = counts
        .iter()
        .fold(None::<(&String, usize)>, |best, (cat, &n)| match best {
            Some((_, best_n)) if best_n >= n => best,
            _ => Some((cat, n)),
        })
        .map(|(cat, _)| cat.clone());

    CategoricalStatistics { count, unique_values: counts.len(), mode, counts }
}

/// Occurrence count per category
pub fn category_counts(categories: Vec<String>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for category in categories {
        *counts.entry(category).or_insert(0) += 1;
    }
    counts
}

/// Quantile of an ascending sample with linear interpolation
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = pos.floor() as usize;
            let upper = pos.ceil() as usize;
            let frac = pos - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * frac
        }
    }
}
