use serde::{Deserialize, Serialize};

use super::ensure_non_negative;
use crate::error::{ConfigError, ConfigResult};

/// Guard added to the segment variance before taking its square root
pub const VARIANCE_EPSILON: f64 = 1e-12;

/// Guard added to the segment standard deviation in the Sharpe proxy
pub const SHARPE_PROXY_EPSILON: f64 = 1e-6;

/// Reward strategy for the rebalancing simulator, paid at every rebalance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "AllocationRewardWire", into = "AllocationRewardWire")]
pub enum AllocationReward {
    /// Segment log-return net of an intra-segment volatility penalty
    ReturnMinusLambdaVol { lambda_vol: f64 },
    /// Mean over standard deviation of the segment's returns under the new weights
    SharpeProxy,
}

impl Default for AllocationReward {
    fn default() -> Self {
        Self::ReturnMinusLambdaVol {
            lambda_vol: DEFAULT_LAMBDA_VOL,
        }
    }
}

const DEFAULT_LAMBDA_VOL: f64 = 5.0e-2;

impl AllocationReward {
    /// Reward for one segment.
    ///
    /// `segment_return` is the log-return the segment earned under the held
    /// weights. The volatility and Sharpe terms come from `risk_returns`, the
    /// segment's per-period returns under the newly chosen weights. An empty
    /// segment yields 0.
    pub fn segment_reward(&self, segment_return: f64, risk_returns: &[f64]) -> f64 {
        if risk_returns.is_empty() {
            return 0.0;
        }
        let n = risk_returns.len() as f64;
        let mean = risk_returns.iter().sum::<f64>() / n;
        let variance = risk_returns
            .iter()
            .map(|r| (r - mean).powi(2))
            .sum::<f64>()
            / n;
        let std = (variance + VARIANCE_EPSILON).sqrt();

        match *self {
            Self::ReturnMinusLambdaVol { lambda_vol } => segment_return - lambda_vol * std,
            Self::SharpeProxy => mean / (std + SHARPE_PROXY_EPSILON),
        }
    }

    fn lambda_vol(&self) -> f64 {
        match *self {
            Self::ReturnMinusLambdaVol { lambda_vol } => lambda_vol,
            Self::SharpeProxy => DEFAULT_LAMBDA_VOL,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum AllocationRewardKind {
    RetMinusLambdaVol,
    SharpeProxy,
}

/// Wire form of the reward block: `{"type": "...", "lambda_vol": ...}`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct AllocationRewardWire {
    #[serde(rename = "type")]
    kind: AllocationRewardKind,
    #[serde(default = "default_lambda_vol")]
    lambda_vol: f64,
}

fn default_lambda_vol() -> f64 {
    DEFAULT_LAMBDA_VOL
}

impl From<AllocationRewardWire> for AllocationReward {
    fn from(wire: AllocationRewardWire) -> Self {
        match wire.kind {
            AllocationRewardKind::RetMinusLambdaVol => Self::ReturnMinusLambdaVol {
                lambda_vol: wire.lambda_vol,
            },
            AllocationRewardKind::SharpeProxy => Self::SharpeProxy,
        }
    }
}

impl From<AllocationReward> for AllocationRewardWire {
    fn from(reward: AllocationReward) -> Self {
        let kind = match reward {
            AllocationReward::ReturnMinusLambdaVol { .. } => AllocationRewardKind::RetMinusLambdaVol,
            AllocationReward::SharpeProxy => AllocationRewardKind::SharpeProxy,
        };
        Self {
            kind,
            lambda_vol: reward.lambda_vol(),
        }
    }
}

/// Configuration of the multi-asset rebalancing simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AllocationConfig {
    /// Trailing rows of log-returns in each observation
    pub window: usize,
    /// Market periods between two rebalances (`k`)
    pub rebalance_every: usize,
    /// Proportional transaction cost on turnover, in basis points
    pub cost_bps: f64,
    /// Reward strategy
    pub reward: AllocationReward,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            window: 60,
            rebalance_every: 5,
            cost_bps: 2.0,
            reward: AllocationReward::default(),
        }
    }
}

impl AllocationConfig {
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

    /// Transaction cost rate per unit of turnover
    pub fn cost_rate(&self) -> f64 {
        self.cost_bps * 1e-4
    }

    /// Check every option against its domain
    pub fn validate(&self) -> ConfigResult<()> {
        if self.window == 0 {
            return Err(ConfigError::invalid("window", "must be at least 1"));
        }
        if self.rebalance_every == 0 {
            return Err(ConfigError::invalid("rebalance_every", "must be at least 1"));
        }
        ensure_non_negative("cost_bps", self.cost_bps)?;
        // Turnover is at most 2, so this keeps `1 - cost` positive
        if self.cost_rate() * 2.0 >= 1.0 {
            return Err(ConfigError::invalid(
                "cost_bps",
                format!("{} bps would wipe out equity on a full rebalance", self.cost_bps),
            ));
        }
        if let AllocationReward::ReturnMinusLambdaVol { lambda_vol } = self.reward {
            ensure_non_negative("reward.lambda_vol", lambda_vol)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = AllocationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window, 60);
        assert_eq!(config.rebalance_every, 5);
        assert_abs_diff_eq!(config.cost_rate(), 2.0e-4);
    }

    #[test]
    fn test_reward_tags() {
        let config = AllocationConfig::from_value(json!({
            "reward": { "type": "sharpe_proxy" }
        }))
        .unwrap();
        assert_eq!(config.reward, AllocationReward::SharpeProxy);

        let config = AllocationConfig::from_value(json!({
            "reward": { "type": "ret_minus_lambda_vol", "lambda_vol": 0.2 }
        }))
        .unwrap();
        assert_eq!(
            config.reward,
            AllocationReward::ReturnMinusLambdaVol { lambda_vol: 0.2 }
        );
    }

    #[test]
    fn test_rejects_out_of_domain() {
        assert!(AllocationConfig::from_json(r#"{"window": 0}"#).is_err());
        assert!(AllocationConfig::from_json(r#"{"rebalance_every": 0}"#).is_err());
        assert!(AllocationConfig::from_json(r#"{"cost_bps": -1.0}"#).is_err());
        assert!(AllocationConfig::from_json(r#"{"cost_bps": 5000.0}"#).is_err());
        assert!(AllocationConfig::from_json(r#"{"lookback": 3}"#).is_err());
    }

    #[test]
    fn test_flat_segment_reward_is_zero_return() {
        let reward = AllocationReward::ReturnMinusLambdaVol { lambda_vol: 0.0 };
        assert_abs_diff_eq!(reward.segment_reward(0.0, &[0.0, 0.0, 0.0]), 0.0);

        // Volatility guard keeps the Sharpe proxy finite on a flat segment
        let proxy = AllocationReward::SharpeProxy.segment_reward(0.0, &[0.0, 0.0]);
        assert!(proxy.is_finite());
        assert_abs_diff_eq!(proxy, 0.0);
    }

    #[test]
    fn test_volatility_penalty() {
        let returns = [0.01, -0.01, 0.01, -0.01];
        let reward = AllocationReward::ReturnMinusLambdaVol { lambda_vol: 1.0 };
        // Population std is 0.01
        assert_abs_diff_eq!(reward.segment_reward(0.0, &returns), -0.01, epsilon = 1e-9);
        assert_abs_diff_eq!(reward.segment_reward(0.03, &returns), 0.02, epsilon = 1e-9);
    }

    #[test]
    fn test_sharpe_proxy() {
        let returns = [0.02, 0.0];
        // mean 0.01, std 0.01; the held-weight return does not enter
        let expected = 0.01 / ((1e-4f64 + VARIANCE_EPSILON).sqrt() + SHARPE_PROXY_EPSILON);
        assert_abs_diff_eq!(
            AllocationReward::SharpeProxy.segment_reward(-1.0, &returns),
            expected,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_empty_segment() {
        assert_eq!(AllocationReward::default().segment_reward(0.0, &[]), 0.0);
    }
}
