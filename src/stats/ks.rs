//! Two-sample Kolmogorov-Smirnov test.

use super::{has_enough_samples, sorted};

/// Largest `n1 * n2` for which the exact null distribution is computed.
/// Bigger samples use the asymptotic Kolmogorov series.
pub const EXACT_MAX_PRODUCT: usize = 10_000;

/// KS statistic and p-value, or `None` with fewer than two values on either side.
///
/// Small samples get the exact two-sided p-value; large ones the
/// Stephens-corrected asymptotic approximation.
pub fn ks_two_sample(reference: &[f64], current: &[f64]) -> Option<(f64, f64)> {
    if !has_enough_samples(reference, current) {
        return None;
    }

    let d = ks_statistic(reference, current);

    if reference.len() * current.len() <= EXACT_MAX_PRODUCT {
        return Some((d, ks_exact_p_value(d, reference.len(), current.len())));
    }

    let n1 = reference.len() as f64;
    let n2 = current.len() as f64;
    let n_eff = (n1 * n2) / (n1 + n2);
    let root = n_eff.sqrt();
    // Stephens' small-sample correction
    let lambda = (root + 0.12 + 0.11 / root) * d;

    Some((d, ks_p_value(lambda)))
}

/// Exact `P(D >= d)` under the null for sample sizes `n1` and `n2`.
///
/// Counts the monotone lattice paths from `(0, 0)` to `(n1, n2)` that stay
/// strictly inside `|i/n1 - j/n2| < d`. Each step is weighted by the
/// probability of drawing from that sample next, so the walk carries
/// probabilities instead of binomial counts and cannot overflow.
pub fn ks_exact_p_value(d: f64, n1: usize, n2: usize) -> f64 {
    if n1 == 0 || n2 == 0 {
        return 1.0;
    }
    // d is |i/n1 - j/n2| at some lattice point, so d * n1 * n2 is an integer
    let h = (d * n1 as f64 * n2 as f64).round() as i64;
    if h <= 0 {
        return 1.0;
    }

    let (m, n) = (n1 as i64, n2 as i64);
    let total = (n1 + n2) as f64;
    let mut prev = vec![0.0f64; n2 + 1];
    let mut cur = vec![0.0f64; n2 + 1];

    for i in 0..=n1 {
        for j in 0..=n2 {
            cur[j] = if (i as i64 * n - j as i64 * m).abs() >= h {
                0.0
            } else if i == 0 && j == 0 {
                1.0
            } else {
                let mut p = 0.0;
                if i > 0 {
                    // last step drew from the reference sample
                    let remaining = total - (i - 1) as f64 - j as f64;
                    p += prev[j] * (n1 - (i - 1)) as f64 / remaining;
                }
                if j > 0 {
                    let remaining = total - i as f64 - (j - 1) as f64;
                    p += cur[j - 1] * (n2 - (j - 1)) as f64 / remaining;
                }
                p
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    (1.0 - prev[n2]).clamp(0.0, 1.0)
}

/// Maximum distance between the two empirical CDFs.
///
/// Tied values are consumed together on both sides before the CDFs are
/// compared, so identical samples give exactly 0.
pub fn ks_statistic(reference: &[f64], current: &[f64]) -> f64 {
    let a = sorted(reference);
    let b = sorted(current);
    let n1 = a.len() as f64;
    let n2 = b.len() as f64;

    let mut d_max = 0.0f64;
    let mut i = 0usize;
    let mut j = 0usize;

    while i < a.len() && j < b.len() {
        let x = a[i].min(b[j]);
        while i < a.len() && a[i] <= x {
            i += 1;
        }
        while j < b.len() && b[j] <= x {
            j += 1;
        }
        let diff = (i as f64 / n1 - j as f64 / n2).abs();
        d_max = d_max.max(diff);
    }

    d_max
}

/// Survival function of the Kolmogorov distribution, `Q(λ)`
pub fn ks_p_value(lambda: f64) -> f64 {
    if lambda <= 0.0 {
        return 1.0;
    }
    // Q(λ) = 2 Σ_{k≥1} (-1)^{k-1} exp(-2 k² λ²)
    let mut p = 0.0;
    for k in 1..=100 {
        let sign = if k % 2 == 1 { 1.0 } else { -1.0 };
        let term = sign * (-2.0 * f64::from(k).powi(2) * lambda.powi(2)).exp();
        p += term;
        if term.abs() < 1e-10 {
            break;
        }
    }
    (2.0 * p).clamp(0.0, 1.0)
}
