//! Experiment settings file
//!
//! One JSON document, every section optional:
//!
//! ```json
//! {
//!   "execution":  { "steps": 50, "init_inventory": 1000, "reward": { "type": "is_only" } },
//!   "allocation": { "window": 60, "rebalance_every": 5, "cost_bps": 2.0 },
//!   "data":       { "source": "synthetic", "assets": 4, "periods": 750 },
//!   "eval":       { "execution_episodes": 20, "allocation_episodes": 5, "workers": 4 },
//!   "baselines":  { "constant_actions": [1, 4] }
//! }
//! ```

use std::path::{Path, PathBuf};

use finlab_baselines::{AlmgrenChrissParams, WeightSignal};
use finlab_core::{AllocationConfig, ConfigError, ExecutionConfig};
use finlab_eval::EvalConfig;
use serde::{Deserialize, Serialize};

use crate::error::RunnerResult;

/// Seeded multi-asset geometric Brownian motion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyntheticSettings {
    pub assets: usize,
    pub periods: usize,
    pub initial_price: f64,
    /// Per-period log drift
    pub drift: f64,
    /// Per-period log volatility
    pub volatility: f64,
    pub seed: u64,
}

impl Default for SyntheticSettings {
    fn default() -> Self {
        Self {
            assets: 4,
            periods: 750,
            initial_price: 100.0,
            drift: 2e-4,
            volatility: 1e-2,
            seed: 7,
        }
    }
}

/// Where allocation prices come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum DataSettings {
    Synthetic(SyntheticSettings),
    /// JSON array of price rows, oldest first
    JsonFile { path: PathBuf },
}

impl Default for DataSettings {
    fn default() -> Self {
        Self::Synthetic(SyntheticSettings::default())
    }
}

/// Which baseline agents to run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BaselineSettings {
    pub almgren_chriss: AlmgrenChrissParams,
    /// Action indices played by constant-fraction agents
    pub constant_actions: Vec<usize>,
    pub signals: Vec<WeightSignal>,
}

impl Default for BaselineSettings {
    fn default() -> Self {
        Self {
            almgren_chriss: AlmgrenChrissParams::default(),
            constant_actions: vec![1, 4],
            signals: vec![
                WeightSignal::EqualWeight,
                WeightSignal::BuyAndHold { initial: None },
                WeightSignal::momentum(),
                WeightSignal::reversal(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerSettings {
    pub execution: ExecutionConfig,
    pub allocation: AllocationConfig,
    pub data: DataSettings,
    pub eval: EvalConfig,
    pub baselines: BaselineSettings,
}

impl RunnerSettings {
    /// Load and validate settings from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> RunnerResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> RunnerResult<Self> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> RunnerResult<()> {
        self.execution.validate()?;
        self.allocation.validate()?;
        self.eval.validate()?;

        if let DataSettings::Synthetic(synthetic) = &self.data {
            if synthetic.assets == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "data.assets",
                    reason: "must be at least 1".to_string(),
                }
                .into());
            }
            let required = self.allocation.window + 1;
            if synthetic.periods < required {
                return Err(ConfigError::InsufficientHistory {
                    required,
                    actual: synthetic.periods,
                }
                .into());
            }
        }
        Ok(())
    }
}
