//! Portfolio weights on the simplex

/// Minimum raw action sum before the rebalancing simulator falls back to equal weights
pub const ACTION_SUM_EPSILON: f64 = 1e-6;

/// Minimum raw signal sum before a weight signal falls back to equal weights
pub const SIGNAL_SUM_EPSILON: f64 = 1e-8;

/// `1/n` for each of `n` assets
pub fn equal_weights(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    vec![1.0 / n as f64; n]
}

/// Clip to non-negative and renormalise to sum 1.
///
/// Non-finite entries count as 0. If what remains sums to `min_sum` or less,
/// the result is equal weights. Entries are scaled by their maximum before
/// summing so large finite actions cannot overflow the sum.
pub fn project_to_simplex(raw: &[f64], min_sum: f64) -> Vec<f64> {
    let clipped: Vec<f64> = raw
        .iter()
        .map(|&x| if x.is_finite() { x.max(0.0) } else { 0.0 })
        .collect();
    let max = clipped.iter().copied().fold(0.0, f64::max);
    if max <= 0.0 {
        return equal_weights(raw.len());
    }

    let scaled: Vec<f64> = clipped.into_iter().map(|x| x / max).collect();
    // Lies in [1, n], so only the product with `max` can overflow
    let sum: f64 = scaled.iter().sum();
    if sum * max <= min_sum {
        return equal_weights(raw.len());
    }
    scaled.into_iter().map(|x| x / sum).collect()
}

/// L1 distance between two weight vectors
pub fn turnover(new: &[f64], old: &[f64]) -> f64 {
    new.iter().zip(old).map(|(a, b)| (a - b).abs()).sum()
}
