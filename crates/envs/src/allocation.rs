//! Multi-asset rebalancing simulator

use std::sync::Arc;

use finlab_core::values::ACTION_SUM_EPSILON;
use finlab_core::{
    AllocationConfig, AllocationObservation, ConfigError, ConfigResult, PriceMatrix,
    ReturnMatrix, Space, Step, equal_weights, project_to_simplex, turnover,
};
use finlab_ports::Environment;
use log::{debug, warn};
use serde::Serialize;

/// Diagnostics of one rebalance
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AllocationInfo {
    /// L1 distance between the new and the previous weights
    pub turnover: f64,
    /// Proportional transaction cost charged on the turnover
    pub cost: f64,
    /// Portfolio log-return over the segment under the previous weights
    pub segment_return: f64,
    /// Periods in the segment (shorter than `k` at the horizon)
    pub segment_len: usize,
    /// Equity after the rebalance
    pub equity: f64,
    /// Weights held from now until the next rebalance
    pub weights: Vec<f64>,
}

/// Mutable state of one rebalancing episode
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationState {
    /// Row pointer into the return matrix
    pub t: usize,
    /// Current weights, always on the simplex
    pub weights: Vec<f64>,
    /// Cumulative equity, starts at 1
    pub equity: f64,
    /// Episode has terminated
    pub done: bool,
}

/// Multi-asset rebalancing MDP
///
/// Each decision covers `k` market periods. The segment is earned under the
/// weights held before the decision; the new weights take effect at the
/// start of the next segment. The reward's risk term scores the new weights
/// over the same segment. Turnover cost is charged multiplicatively on
/// equity at every rebalance.
pub struct AllocationEnv {
    config: AllocationConfig,
    returns: Arc<ReturnMatrix>,
    state: AllocationState,
}

impl AllocationEnv {
    /// Create a simulator from prices, validating configuration and history length
    pub fn new(prices: &PriceMatrix, config: AllocationConfig) -> ConfigResult<Self> {
        let required = config.window + 1;
        if prices.rows() < required {
            return Err(ConfigError::InsufficientHistory {
                required,
                actual: prices.rows(),
            });
        }
        Self::from_returns(Arc::new(prices.log_returns()), config)
    }

    /// Create a simulator over a shared, read-only return matrix
    pub fn from_returns(returns: Arc<ReturnMatrix>, config: AllocationConfig) -> ConfigResult<Self> {
        config.validate()?;
        if returns.periods() < config.window {
            return Err(ConfigError::InsufficientHistory {
                required: config.window + 1,
                actual: returns.periods() + 1,
            });
        }
        let state = Self::initial_state(&config, returns.assets());

        Ok(Self {
            config,
            returns,
            state,
        })
    }

    fn initial_state(config: &AllocationConfig, assets: usize) -> AllocationState {
        AllocationState {
            t: config.window,
            weights: equal_weights(assets),
            equity: 1.0,
            done: false,
        }
    }

    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    pub fn state(&self) -> &AllocationState {
        &self.state
    }

    pub fn returns(&self) -> &Arc<ReturnMatrix> {
        &self.returns
    }

    pub fn assets(&self) -> usize {
        self.returns.assets()
    }

    pub fn horizon(&self) -> usize {
        self.returns.periods()
    }

    pub fn equity(&self) -> f64 {
        self.state.equity
    }

    pub fn weights(&self) -> &[f64] {
        &self.state.weights
    }

    /// Trailing `window` rows ending at `t`, clamped to the horizon
    fn observe(&self) -> AllocationObservation {
        let end = self.state.t.min(self.horizon());
        let start = end.saturating_sub(self.config.window);
        AllocationObservation::new(self.returns.slice_rows(start, end))
    }

    /// Fit a raw action to the asset count: extras dropped, missing entries 0
    fn conform(&self, mut action: Vec<f64>) -> Vec<f64> {
        let n = self.assets();
        if action.len() != n {
            warn!(
                "Allocation action has {} entries for {} assets, resizing",
                action.len(),
                n
            );
            action.resize(n, 0.0);
        }
        action
    }
}

impl Environment for AllocationEnv {
    type Action = Vec<f64>;
    type Observation = AllocationObservation;
    type Info = AllocationInfo;

    /// The simulator has no randomness, so `seed` is ignored
    fn reset(&mut self, _seed: Option<u64>) -> AllocationObservation {
        self.state = Self::initial_state(&self.config, self.assets());
        self.observe()
    }

    fn step(&mut self, action: Vec<f64>) -> Step<AllocationObservation, AllocationInfo> {
        if self.state.done {
            return Step {
                observation: self.observe(),
                reward: 0.0,
                terminated: true,
                truncated: false,
                info: AllocationInfo {
                    equity: self.state.equity,
                    weights: self.state.weights.clone(),
                    ..Default::default()
                },
            };
        }

        let action = self.conform(action);
        let new_weights = project_to_simplex(&action, ACTION_SUM_EPSILON);

        let turnover = turnover(&new_weights, &self.state.weights);
        let cost = self.config.cost_rate() * turnover;

        let k = self.config.rebalance_every;
        let t = self.state.t;
        let segment = self.returns.portfolio_returns(t, t + k, &self.state.weights);
        let segment_return: f64 = segment.iter().sum();
        let risk = self.returns.portfolio_returns(t, t + k, &new_weights);
        let reward = self.config.reward.segment_reward(segment_return, &risk);

        self.state.equity *= segment_return.exp() * (1.0 - cost);
        self.state.weights = new_weights;
        self.state.t += k;

        let terminated = self.state.t >= self.horizon();
        self.state.done = terminated;

        debug!(
            "Rebalance at t={}: turnover={:.4}, seg_ret={:.6}, equity={:.6}, reward={:.6}",
            t, turnover, segment_return, self.state.equity, reward
        );

        Step {
            observation: self.observe(),
            reward,
            terminated,
            truncated: false,
            info: AllocationInfo {
                turnover,
                cost,
                segment_return,
                segment_len: segment.len(),
                equity: self.state.equity,
                weights: self.state.weights.clone(),
            },
        }
    }

    fn action_space(&self) -> Space {
        Space::bounded(vec![self.assets()], 0.0, 1.0)
    }

    fn observation_space(&self) -> Space {
        Space::unbounded(vec![self.config.window, self.assets()])
    }

    fn name(&self) -> &str {
        "AllocationEnv"
    }
}
