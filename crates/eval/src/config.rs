use finlab_core::ConfigError;
use serde::{Deserialize, Serialize};

use crate::error::EvalResult;

/// Rollout settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalConfig {
    /// Episodes per execution agent
    pub execution_episodes: usize,
    /// Episodes per allocation agent
    pub allocation_episodes: usize,
    /// Worker threads for execution rollouts (1 = sequential)
    pub workers: usize,
    /// Execution episode `i` resets with seed `base_seed + i`
    pub base_seed: u64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            execution_episodes: 20,
            allocation_episodes: 5,
            workers: 1,
            base_seed: 0,
        }
    }
}

impl EvalConfig {
    pub fn validate(&self) -> EvalResult<()> {
        if self.workers == 0 {
            return Err(ConfigError::InvalidValue {
                key: "workers",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Seed for execution episode `episode`
    pub fn episode_seed(&self, episode: usize) -> u64 {
        self.base_seed.wrapping_add(episode as u64)
    }
}
