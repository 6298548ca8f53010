use finlab_core::{ConfigResult, ExecutionConfig, ExecutionObservation, Space, Step};
use finlab_ports::Environment;
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use super::mid_price::next_mid;
use super::state::EpisodeState;

/// Liquidation fractions of the current inventory, indexed by action
pub const ACTION_FRACTIONS: [f64; 5] = [0.0, 0.05, 0.10, 0.20, 0.40];

/// Diagnostics of one liquidation step
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ExecutionInfo {
    /// Shares sold by the chosen action
    pub traded: u64,
    /// Impacted price of that fill
    pub trade_price: f64,
    /// Shares sold by the terminal forced liquidation
    pub forced_liquidation: u64,
    /// Inventory after the step
    pub inventory: u64,
    /// Cash after the step
    pub cash: f64,
    /// Implementation shortfall, set on the terminal step
    pub shortfall: Option<f64>,
}

/// Single-asset liquidation MDP
///
/// Every step sells `round(fraction * inventory)` shares at the mid depressed
/// by linear impact. The episode ends when the horizon is reached or the
/// inventory is gone; any residual is then force-liquidated and the whole
/// episode is scored at once. Non-terminal steps pay 0.
pub struct ExecutionEnv {
    config: ExecutionConfig,
    rng: StdRng,
    state: EpisodeState,
}

impl ExecutionEnv {
    /// Create a simulator, validating the configuration
    pub fn new(config: ExecutionConfig) -> ConfigResult<Self> {
        config.validate()?;
        let rng = StdRng::seed_from_u64(config.seed);
        let state = EpisodeState::new(config.init_inventory, config.steps);

        Ok(Self { config, rng, state })
    }

    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    pub fn state(&self) -> &EpisodeState {
        &self.state
    }

    pub fn cash(&self) -> f64 {
        self.state.cash
    }

    pub fn inventory(&self) -> u64 {
        self.state.inventory
    }

    /// Cost of selling the whole initial inventory at the reference mid
    pub fn ideal_cost(&self) -> f64 {
        self.state.reference_mid() * self.config.init_inventory as f64
    }

    /// `paid - ideal`, where `paid = -cash`
    pub fn shortfall(&self) -> f64 {
        -self.state.cash - self.ideal_cost()
    }

    fn observe(&self) -> ExecutionObservation {
        ExecutionObservation {
            time_elapsed: self.state.t as f64 / self.config.steps as f64,
            inventory_remaining: self.state.inventory as f64 / self.inventory_scale(),
            last_return: self.state.last_return(),
        }
    }

    /// Denominator for inventory fractions, guarded against an empty order
    fn inventory_scale(&self) -> f64 {
        self.config.init_inventory.max(1) as f64
    }

    fn impacted_price(&self, qty: u64) -> f64 {
        let fraction = qty as f64 / self.inventory_scale();
        self.state.mid() * (1.0 - self.config.impact_coeff * fraction)
    }

    /// Sell `qty` shares at the impacted mid, returning the fill price
    fn fill(&mut self, qty: u64) -> f64 {
        let price = self.impacted_price(qty);
        self.state.cash -= qty as f64 * (price + self.config.fee_per_share);
        self.state.inventory -= qty;
        price
    }
}

impl Environment for ExecutionEnv {
    type Action = usize;
    type Observation = ExecutionObservation;
    type Info = ExecutionInfo;

    fn reset(&mut self, seed: Option<u64>) -> ExecutionObservation {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.state = EpisodeState::new(self.config.init_inventory, self.config.steps);
        self.observe()
    }

    fn step(&mut self, action: usize) -> Step<ExecutionObservation, ExecutionInfo> {
        if self.state.done {
            return Step {
                observation: self.observe(),
                reward: 0.0,
                terminated: true,
                truncated: false,
                info: ExecutionInfo {
                    inventory: self.state.inventory,
                    cash: self.state.cash,
                    ..Default::default()
                },
            };
        }

        // Out-of-range indices clip to the most aggressive fraction
        let index = action.min(ACTION_FRACTIONS.len() - 1);
        let fraction = ACTION_FRACTIONS[index];

        let inventory = self.state.inventory;
        let wanted = (fraction * inventory as f64).round_ties_even() as u64;
        let traded = wanted.min(inventory);
        let trade_price = self.fill(traded);

        let mid = next_mid(&self.config, self.state.mid(), &mut self.rng);
        self.state.mid_history.push(mid);
        self.state.t += 1;

        let terminated = self.state.t >= self.config.steps || self.state.inventory == 0;
        let mut info = ExecutionInfo {
            traded,
            trade_price,
            ..Default::default()
        };
        let mut reward = 0.0;

        if terminated {
            let residual = self.state.inventory;
            if residual > 0 {
                self.fill(residual);
                info.forced_liquidation = residual;
            }
            let shortfall = self.shortfall();
            reward = self.config.reward.terminal_reward(shortfall, residual);
            info.shortfall = Some(shortfall);
            self.state.done = true;

            debug!(
                "Execution episode done at t={}: residual={}, shortfall={:.6}, reward={:.6}",
                self.state.t, residual, shortfall, reward
            );
        }

        info.inventory = self.state.inventory;
        info.cash = self.state.cash;

        Step {
            observation: self.observe(),
            reward,
            terminated,
            truncated: false,
            info,
        }
    }

    fn action_space(&self) -> Space {
        Space::discrete(ACTION_FRACTIONS.len())
    }

    fn observation_space(&self) -> Space {
        Space::unbounded(vec![3])
    }

    fn name(&self) -> &str {
        "ExecutionEnv"
    }
}
