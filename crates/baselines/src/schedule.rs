//! Execution schedules
//!
//! Each generator returns per-step share quantities summing to `q0`.

use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult, ensure_non_negative};

/// Time-weighted schedule: `q0 / horizon` at every step
pub fn twap_schedule(horizon: usize, q0: f64) -> ScheduleResult<Vec<f64>> {
    if horizon == 0 {
        return Err(ScheduleError::ZeroHorizon);
    }
    ensure_non_negative("q0", q0)?;

    Ok(vec![q0 / horizon as f64; horizon])
}

/// Volume-weighted schedule: `q0` split in proportion to `profile`
pub fn vwap_schedule(profile: &[f64], q0: f64) -> ScheduleResult<Vec<f64>> {
    if profile.is_empty() {
        return Err(ScheduleError::EmptyProfile);
    }
    ensure_non_negative("q0", q0)?;
    for &volume in profile {
        ensure_non_negative("volume", volume)?;
    }

    let total: f64 = profile.iter().sum();
    if total <= 0.0 {
        return Err(ScheduleError::DegenerateProfile(total));
    }
    Ok(profile.iter().map(|v| q0 * v / total).collect())
}

/// Parameters of the simplified Almgren-Chriss schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlmgrenChrissParams {
    /// Risk aversion (lambda)
    pub risk_aversion: f64,
    /// Price volatility (sigma)
    pub sigma: f64,
    /// Temporary impact coefficient (eta)
    pub eta: f64,
}

impl Default for AlmgrenChrissParams {
    fn default() -> Self {
        Self {
            risk_aversion: 1e-6,
            sigma: 0.2,
            eta: 1e-6,
        }
    }
}

impl AlmgrenChrissParams {
    /// Floor applied to `eta` before dividing
    const ETA_FLOOR: f64 = 1e-12;

    /// Blend weight `clip(lambda * sigma^2 / eta, 0, 1)` toward the front-loaded tilt
    pub fn urgency(&self) -> f64 {
        let ratio = self.risk_aversion * self.sigma * self.sigma / self.eta.max(Self::ETA_FLOOR);
        ratio.clamp(0.0, 1.0)
    }

    fn validate(&self) -> ScheduleResult<()> {
        ensure_non_negative("risk_aversion", self.risk_aversion)?;
        ensure_non_negative("sigma", self.sigma)?;
        ensure_non_negative("eta", self.eta)
    }
}

/// Simplified Almgren-Chriss schedule.
///
/// Blends the uniform schedule with a linearly decreasing tilt running from
/// 1.0 at the first step to 0.5 at the last, then rescales so the total is
/// exactly `q0`.
pub fn almgren_chriss_schedule(
    horizon: usize,
    q0: f64,
    params: &AlmgrenChrissParams,
) -> ScheduleResult<Vec<f64>> {
    let uniform = twap_schedule(horizon, q0)?;
    params.validate()?;

    let tilt = front_loaded_tilt(horizon);
    let alpha = params.urgency();
    let blended: Vec<f64> = uniform
        .iter()
        .zip(&tilt)
        .map(|(u, w)| (1.0 - alpha) * u + alpha * q0 * w)
        .collect();

    let total: f64 = blended.iter().sum();
    if total <= 0.0 {
        return Ok(blended);
    }
    Ok(blended.into_iter().map(|q| q * q0 / total).collect())
}

/// `linspace(1.0, 0.5, n)` normalised to sum 1
fn front_loaded_tilt(n: usize) -> Vec<f64> {
    let raw: Vec<f64> = match n {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => {
            let step = 0.5 / (n - 1) as f64;
            (0..n).map(|i| 1.0 - step * i as f64).collect()
        }
    };
    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|w| w / total).collect()
}
