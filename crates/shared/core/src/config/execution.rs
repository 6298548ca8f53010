use serde::{Deserialize, Serialize};

use super::{ensure_finite, ensure_non_negative};
use crate::error::{ConfigError, ConfigResult};

/// Reward strategy for the liquidation simulator
///
/// Both variants pay only at termination. `ShortfallPlusInventoryPenalty`
/// additionally charges `inv_penalty * residual^2` on the inventory left
/// unsold before the forced liquidation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ExecutionRewardWire", into = "ExecutionRewardWire")]
pub enum ExecutionReward {
    /// Negative implementation shortfall (`is_only`)
    ShortfallOnly,
    /// Negative shortfall minus a quadratic stalling penalty (`is_plus_inv_pen`)
    ShortfallPlusInventoryPenalty { inv_penalty: f64 },
}

impl Default for ExecutionReward {
    fn default() -> Self {
        Self::ShortfallOnly
    }
}

impl ExecutionReward {
    /// Terminal reward given the episode's shortfall and the residual
    /// inventory observed before forced liquidation.
    pub fn terminal_reward(&self, shortfall: f64, residual: u64) -> f64 {
        match *self {
            Self::ShortfallOnly => -shortfall,
            Self::ShortfallPlusInventoryPenalty { inv_penalty } => {
                let residual = residual as f64;
                -shortfall - inv_penalty * residual * residual
            }
        }
    }

    fn inv_penalty(&self) -> f64 {
        match *self {
            Self::ShortfallOnly => 0.0,
            Self::ShortfallPlusInventoryPenalty { inv_penalty } => inv_penalty,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
enum ExecutionRewardKind {
    #[serde(rename = "is_only")]
    ShortfallOnly,
    #[serde(rename = "is_plus_inv_pen")]
    ShortfallPlusInventoryPenalty,
}

/// Wire form of the reward block: `{"type": "...", "inv_penalty": ...}`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExecutionRewardWire {
    #[serde(rename = "type")]
    kind: ExecutionRewardKind,
    #[serde(default)]
    inv_penalty: f64,
}

impl From<ExecutionRewardWire> for ExecutionReward {
    fn from(wire: ExecutionRewardWire) -> Self {
        match wire.kind {
            ExecutionRewardKind::ShortfallOnly => Self::ShortfallOnly,
            ExecutionRewardKind::ShortfallPlusInventoryPenalty => {
                Self::ShortfallPlusInventoryPenalty {
                    inv_penalty: wire.inv_penalty,
                }
            }
        }
    }
}

impl From<ExecutionReward> for ExecutionRewardWire {
    fn from(reward: ExecutionReward) -> Self {
        let kind = match reward {
            ExecutionReward::ShortfallOnly => ExecutionRewardKind::ShortfallOnly,
            ExecutionReward::ShortfallPlusInventoryPenalty { .. } => {
                ExecutionRewardKind::ShortfallPlusInventoryPenalty
            }
        };
        Self {
            kind,
            inv_penalty: reward.inv_penalty(),
        }
    }
}

/// How the reference mid-price moves between decision steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceProcess {
    /// Mid stays at the reference price for the whole episode
    #[default]
    Static,
    /// Geometric Brownian motion driven by `gbm_mu`, `gbm_sigma` and `dt`
    Gbm,
}

/// Configuration of the single-asset liquidation simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExecutionConfig {
    /// Number of decision steps in the horizon
    pub steps: usize,
    /// Shares to liquidate at the start of each episode
    pub init_inventory: u64,
    /// Fee charged per share traded
    pub fee_per_share: f64,
    /// Linear impact coefficient on the traded fraction of the initial inventory
    pub impact_coeff: f64,
    /// Drift of the reference price process
    pub gbm_mu: f64,
    /// Volatility of the reference price process
    pub gbm_sigma: f64,
    /// Time step of the reference price process
    pub dt: f64,
    /// Seed of the environment's random generator
    pub seed: u64,
    /// Reference price dynamics
    pub price_process: PriceProcess,
    /// Reward strategy
    pub reward: ExecutionReward,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            steps: 50,
            init_inventory: 1000,
            fee_per_share: 1e-4,
            impact_coeff: 2e-3,
            gbm_mu: 0.0,
            gbm_sigma: 0.02,
            dt: 1.0,
            seed: 123,
            price_process: PriceProcess::Static,
            reward: ExecutionReward::ShortfallOnly,
        }
    }
}

impl ExecutionConfig {
    /// Parse and validate from a JSON object
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate from an already decoded option mapping
    pub fn from_value(value: serde_json::Value) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_value(value).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_reward(mut self, reward: ExecutionReward) -> Self {
        self.reward = reward;
        self
    }

    /// Check every option against its domain
    pub fn validate(&self) -> ConfigResult<()> {
        if self.steps == 0 {
            return Err(ConfigError::invalid("steps", "horizon must be at least 1"));
        }
        ensure_non_negative("fee_per_share", self.fee_per_share)?;
        ensure_non_negative("impact_coeff", self.impact_coeff)?;
        ensure_finite("gbm_mu", self.gbm_mu)?;
        ensure_non_negative("gbm_sigma", self.gbm_sigma)?;
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::invalid(
                "dt",
                format!("must be finite and > 0, got {}", self.dt),
            ));
        }
        ensure_non_negative("reward.inv_penalty", self.reward.inv_penalty())?;
        Ok(())
    }
}
