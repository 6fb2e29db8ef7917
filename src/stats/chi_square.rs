//! Chi-square test of a 2×K contingency table.

use std::collections::{BTreeMap, BTreeSet};

use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Chi-square statistic, p-value and degrees of freedom
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquareOutcome {
    pub statistic: f64,
    pub p_value: f64,
    pub dof: usize,
}

/// Test whether two category histograms come from the same distribution.
///
/// Rows are (reference, current), columns the union of categories with
/// zero-filled gaps. Yates' correction is applied for one degree of
/// freedom. Returns `None` when any expected count is zero (an empty
/// side) or the distribution cannot be built.
pub fn chi_square_contingency(
    reference: &BTreeMap<String, usize>,
    current: &BTreeMap<String, usize>,
) -> Option<ChiSquareOutcome> {
    let categories: BTreeSet<&String> = reference.keys().chain(current.keys()).collect();
    if categories.is_empty() {
        return None;
    }

    let rows: [Vec<f64>; 2] = [
        categories.iter().map(|&c| count(reference, c)).collect(),
        categories.iter().map(|&c| count(current, c)).collect(),
    ];
    let row_totals: [f64; 2] = [rows[0].iter().sum(), rows[1].iter().sum()];
    let grand_total = row_totals[0] + row_totals[1];
    let col_totals: Vec<f64> = (0..categories.len()).map(|k| rows[0][k] + rows[1][k]).collect();

    let expected: Vec<[f64; 2]> = col_totals
        .iter()
        .map(|&col| [row_totals[0] * col / grand_total, row_totals[1] * col / grand_total])
        .collect();
    if expected.iter().flatten().any(|&e| !(e > 0.0)) {
        return None;
    }

    let dof = categories.len() - 1;
    if dof == 0 {
        return Some(ChiSquareOutcome { statistic: 0.0, p_value: 1.0, dof });
    }

    let mut statistic = 0.0;
    for (k, exp) in expected.iter().enumerate() {
        for (row, &e) in rows.iter().zip(exp) {
            let mut diff = (row[k] - e).abs();
            if dof == 1 {
                diff -= diff.min(0.5);
            }
            statistic += diff * diff / e;
        }
    }

    let p_value = ChiSquared::new(dof as f64).ok()?.sf(statistic);
    if !p_value.is_finite() {
        return None;
    }

    Some(ChiSquareOutcome { statistic, p_value: p_value.clamp(0.0, 1.0), dof })
}

fn count(histogram: &BTreeMap<String, usize>, category: &str) -> f64 {
    histogram.get(category).copied().unwrap_or(0) as f64
}
