//! Serializable rollout summaries

use serde::Serialize;

use crate::metrics::{SHARPE_EPSILON, max_drawdown, mean, sharpe, std_dev};

/// Outcome of one liquidation episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExecutionEpisode {
    pub episode: usize,
    pub seed: u64,
    pub shortfall: f64,
    /// Sum of rewards (the terminal reward for the built-in simulator)
    pub reward: f64,
    pub steps: usize,
}

/// Aggregate of a liquidation rollout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionReport {
    pub agent: String,
    pub episodes: usize,
    pub shortfall_mean: f64,
    pub shortfall_std: f64,
    pub shortfall_min: f64,
    pub shortfall_max: f64,
    pub mean_reward: f64,
    pub mean_steps: f64,
    pub shortfalls: Vec<f64>,
}

impl ExecutionReport {
    /// Fold episodes, which must already be in episode order
    pub fn from_episodes(agent: impl Into<String>, episodes: &[ExecutionEpisode]) -> Self {
        let shortfalls: Vec<f64> = episodes.iter().map(|e| e.shortfall).collect();
        let rewards: Vec<f64> = episodes.iter().map(|e| e.reward).collect();
        let steps: Vec<f64> = episodes.iter().map(|e| e.steps as f64).collect();

        Self {
            agent: agent.into(),
            episodes: episodes.len(),
            shortfall_mean: mean(&shortfalls),
            shortfall_std: std_dev(&shortfalls),
            shortfall_min: shortfalls.iter().copied().fold(f64::INFINITY, f64::min),
            shortfall_max: shortfalls.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean_reward: mean(&rewards),
            mean_steps: mean(&steps),
            shortfalls,
        }
    }
}

/// Rewards and equity of one rebalancing episode
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AllocationEpisode {
    pub rewards: Vec<f64>,
    /// Simulator equity after each rebalance
    pub equity: Vec<f64>,
    pub turnover: Vec<f64>,
}

/// Aggregate of a rebalancing rollout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationReport {
    pub agent: String,
    pub episodes: usize,
    pub rebalances: usize,
    /// Sharpe of the pooled per-rebalance rewards
    pub sharpe: f64,
    /// Max drawdown of the pooled equity curve
    pub max_drawdown: f64,
    pub mean_reward: f64,
    pub mean_turnover: f64,
    pub final_equity: Vec<f64>,
}

impl AllocationReport {
    /// Pool episodes in order.
    ///
    /// The pooled curve starts at 1 and chains each episode's equity onto the
    /// final value of the one before it.
    pub fn from_episodes(agent: impl Into<String>, episodes: &[AllocationEpisode]) -> Self {
        let rewards: Vec<f64> = episodes.iter().flat_map(|e| e.rewards.iter().copied()).collect();
        let turnover: Vec<f64> = episodes.iter().flat_map(|e| e.turnover.iter().copied()).collect();

        let mut curve = vec![1.0];
        let mut base = 1.0;
        for episode in episodes {
            curve.extend(episode.equity.iter().map(|e| base * e));
            base *= episode.equity.last().copied().unwrap_or(1.0);
        }

        Self {
            agent: agent.into(),
            episodes: episodes.len(),
            rebalances: rewards.len(),
            sharpe: sharpe(&rewards, SHARPE_EPSILON),
            max_drawdown: max_drawdown(&curve),
            mean_reward: mean(&rewards),
            mean_turnover: mean(&turnover),
            final_equity: episodes
                .iter()
                .map(|e| e.equity.last().copied().unwrap_or(1.0))
                .collect(),
        }
    }
}
