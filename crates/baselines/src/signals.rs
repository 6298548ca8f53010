//! Portfolio weight signals
//!
//! Every signal lands on the simplex and falls back to equal weights when
//! the raw candidate sums to `SIGNAL_SUM_EPSILON` or less.

use finlab_core::values::SIGNAL_SUM_EPSILON;
use finlab_core::{ReturnMatrix, equal_weights, project_to_simplex};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};

pub const DEFAULT_MOMENTUM_LOOKBACK: usize = 60;
pub const DEFAULT_REVERSAL_LOOKBACK: usize = 5;

/// `1/n` for each asset
pub fn equal_weight(assets: usize) -> ScheduleResult<Vec<f64>> {
    if assets == 0 {
        return Err(ScheduleError::NoAssets);
    }
    Ok(equal_weights(assets))
}

/// Initial weights held forever: `initial` when given, equal weights otherwise
pub fn buy_and_hold(assets: usize, initial: Option<&[f64]>) -> ScheduleResult<Vec<f64>> {
    let Some(initial) = initial else {
        return equal_weight(assets);
    };
    if initial.len() != assets {
        return Err(ScheduleError::AssetMismatch {
            expected: assets,
            actual: initial.len(),
        });
    }
    if assets == 0 {
        return Err(ScheduleError::NoAssets);
    }
    Ok(normalise(initial))
}

/// Positive part of each asset's mean return over the last `lookback` periods
/// (the whole window when `lookback` is 0)
pub fn momentum_signal(returns: &ReturnMatrix, lookback: usize) -> Vec<f64> {
    let means = returns.mean_over_last(lookback);
    normalise(&means)
}

/// Positive part of each asset's negated mean return over the last `lookback` periods
pub fn reversal_signal(returns: &ReturnMatrix, lookback: usize) -> Vec<f64> {
    let negated: Vec<f64> = returns.mean_over_last(lookback).iter().map(|m| -m).collect();
    normalise(&negated)
}

fn normalise(raw: &[f64]) -> Vec<f64> {
    let positive: f64 = raw.iter().filter(|x| x.is_finite()).map(|x| x.max(0.0)).sum();
    if positive <= SIGNAL_SUM_EPSILON {
        debug!("Signal sums to {:.3e}, falling back to equal weights", positive);
    }
    project_to_simplex(raw, SIGNAL_SUM_EPSILON)
}

/// Closed set of allocation weight signals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WeightSignal {
    EqualWeight,
    BuyAndHold {
        #[serde(default)]
        initial: Option<Vec<f64>>,
    },
    Momentum {
        #[serde(default = "default_momentum_lookback")]
        lookback: usize,
    },
    Reversal {
        #[serde(default = "default_reversal_lookback")]
        lookback: usize,
    },
}

fn default_momentum_lookback() -> usize {
    DEFAULT_MOMENTUM_LOOKBACK
}

fn default_reversal_lookback() -> usize {
    DEFAULT_REVERSAL_LOOKBACK
}

impl WeightSignal {
    pub fn momentum() -> Self {
        Self::Momentum {
            lookback: DEFAULT_MOMENTUM_LOOKBACK,
        }
    }

    pub fn reversal() -> Self {
        Self::Reversal {
            lookback: DEFAULT_REVERSAL_LOOKBACK,
        }
    }

    /// Weights for the trailing `returns` window
    pub fn weights(&self, returns: &ReturnMatrix) -> ScheduleResult<Vec<f64>> {
        let assets = returns.assets();
        match self {
            Self::EqualWeight => equal_weight(assets),
            Self::BuyAndHold { initial } => buy_and_hold(assets, initial.as_deref()),
            Self::Momentum { lookback } => Ok(momentum_signal(returns, *lookback)),
            Self::Reversal { lookback } => Ok(reversal_signal(returns, *lookback)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::EqualWeight => "equal_weight",
            Self::BuyAndHold { .. } => "buy_and_hold",
            Self::Momentum { .. } => "momentum",
            Self::Reversal { .. } => "reversal",
        }
    }
}
