//! Two-sample comparators behind the drift engine.
//!
//! Every function here is stateless: it takes a reference sample and a
//! current sample and returns `None` when the comparison is not defined
//! (too few values, degenerate contingency table). None of them log or
//! allocate shared state, so they are safe to call from worker threads.
//!
//! - [`ks_two_sample`]: Kolmogorov-Smirnov statistic and p-value
//! - [`wasserstein_distance`]: 1-D Earth Mover's Distance
//! - [`population_stability_index`]: binned PSI
//! - [`chi_square_contingency`]: 2×K contingency chi-square test

mod chi_square;
mod ks;
mod psi;
mod wasserstein;


pub use chi_square::{chi_square_contingency, ChiSquareOutcome};
pub use ks::{ks_exact_p_value, ks_p_value, ks_statistic, ks_two_sample, EXACT_MAX_PRODUCT};
pub use psi::{bin_counts, population_stability_index, PSI_EPSILON};
pub use wasserstein::{downsample, wasserstein_distance};

/// Fewest non-missing values a continuous comparison needs on each side
pub const MIN_SAMPLES: usize = 2;

/// Ascending copy of a sample. Callers have already dropped non-finite values.
pub(crate) fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

pub(crate) fn has_enough_samples(reference: &[f64], current: &[f64]) -> bool {
    reference.len() >= MIN_SAMPLES && current.len() >= MIN_SAMPLES
}
