//! Wasserstein (Earth Mover's) distance for 1-D samples.

use rand::Rng;

use super::{has_enough_samples, sorted};

/// Earth Mover's Distance between two samples.
///
/// When the lengths differ, the longer sample is downsampled without
/// replacement to the shorter length using `rng`; the distance is then the
/// mean absolute difference of the sorted samples.
pub fn wasserstein_distance<R: Rng + ?Sized>(
    reference: &[f64],
    current: &[f64],
    rng: &mut R,
) -> Option<f64> {
    if !has_enough_samples(reference, current) {
        return None;
    }

    let n = reference.len().min(current.len());
    let a = sorted(&downsample(reference, n, rng));
    let b = sorted(&downsample(current, n, rng));

    let total: f64 = a.iter().zip(&b).map(|(x, y)| (x - y).abs()).sum();
    Some(total / n as f64)
}

/// Uniform random subset of `amount` values, without replacement.
///
/// Returns the sample unchanged when it is not longer than `amount`.
pub fn downsample<R: Rng + ?Sized>(values: &[f64], amount: usize, rng: &mut R) -> Vec<f64> {
    if values.len() <= amount {
        return values.to_vec();
    }
    rand::seq::index::sample(rng, values.len(), amount)
        .iter()
        .map(|idx| values[idx])
        .collect()
}
