//! Scalar performance statistics over return and equity series

/// Guard added to the standard deviation in [`sharpe`]
pub const SHARPE_EPSILON: f64 = 1e-8;

/// `paid - ideal`; positive means worse than the arrival-price benchmark
pub fn implementation_shortfall(paid: f64, ideal: f64) -> f64 {
    paid - ideal
}

/// Arithmetic mean, 0 for an empty series
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation, 0 for an empty series
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Mean over (standard deviation + `eps`), not annualised
pub fn sharpe(returns: &[f64], eps: f64) -> f64 {
    mean(returns) / (std_dev(returns) + eps)
}

/// Worst peak-to-trough decline as a fraction of the peak; always <= 0
pub fn max_drawdown(equity: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst: f64 = 0.0;
    for &value in equity {
        peak = peak.max(value);
        if peak > 0.0 {
            worst = worst.min((value - peak) / peak);
        }
    }
    worst
}
