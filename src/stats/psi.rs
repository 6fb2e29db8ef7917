//! Population Stability Index.

use super::has_enough_samples;

/// Additive smoothing inside the PSI log ratio
pub const PSI_EPSILON: f64 = 1e-10;

/// PSI over `bins` equal-width bins spanning both samples.
///
/// `PSI = Σ (cur% - ref%) * ln((cur% + ε) / (ref% + ε))`
pub fn population_stability_index(reference: &[f64], current: &[f64], bins: usize) -> Option<f64> {
    if bins == 0 || !has_enough_samples(reference, current) {
        return None;
    }

    let (mut lo, mut hi) = reference
        .iter()
        .chain(current)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));
    if !(lo.is_finite() && hi.is_finite()) {
        return None;
    }
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let ref_counts = bin_counts(reference, lo, hi, bins);
    let cur_counts = bin_counts(current, lo, hi, bins);
    let n_ref = reference.len() as f64;
    let n_cur = current.len() as f64;

    let psi = ref_counts
        .iter()
        .zip(&cur_counts)
        .map(|(&r, &c)| {
            let ref_pct = r as f64 / n_ref;
            let cur_pct = c as f64 / n_cur;
            (cur_pct - ref_pct) * ((cur_pct + PSI_EPSILON) / (ref_pct + PSI_EPSILON)).ln()
        })
        .sum();

    Some(psi)
}

/// Histogram over `bins` equal-width bins on `[lo, hi]`.
///
/// Bins are half-open except the last, which also takes `hi`. Values
/// outside the range are ignored.
pub fn bin_counts(data: &[f64], lo: f64, hi: f64, bins: usize) -> Vec<usize> {
    let mut counts = vec![0; bins];
    if bins == 0 || hi <= lo {
        return counts;
    }
    let width = (hi - lo) / bins as f64;
    for &val in data {
        if !(lo..=hi).contains(&val) {
            continue;
        }
        let idx = (((val - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
}
