//! Baseline agents that replay schedules and signals through the simulators

use finlab_core::{AllocationObservation, ExecutionConfig, ExecutionObservation, equal_weights};
use finlab_envs::{ACTION_FRACTIONS, AllocationEnv, ExecutionEnv};
use finlab_ports::{Agent, AgentResult, TrainingBudget};
use log::{debug, warn};

use crate::error::ScheduleResult;
use crate::schedule::{AlmgrenChrissParams, almgren_chriss_schedule, twap_schedule};
use crate::signals::WeightSignal;

/// Index of the liquidation fraction closest to `target`
pub fn closest_fraction(target: f64) -> usize {
    ACTION_FRACTIONS
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (*a - target).abs().total_cmp(&(*b - target).abs()))
        .map(|(index, _)| index)
        .unwrap_or(0)
}

/// Replays a per-step schedule through the discrete fraction menu.
///
/// Each step it sells whatever brings the position back onto the schedule's
/// cumulative path, rounded to the nearest available fraction of the
/// remaining inventory.
#[derive(Debug, Clone)]
pub struct ScheduleAgent {
    name: String,
    init_inventory: u64,
    /// Shares the schedule still holds after each step
    remaining_after: Vec<f64>,
}

impl ScheduleAgent {
    pub fn new(name: impl Into<String>, schedule: &[f64], init_inventory: u64) -> Self {
        let total = init_inventory as f64;
        let mut sold = 0.0;
        let remaining_after = schedule
            .iter()
            .map(|q| {
                sold += q;
                (total - sold).max(0.0)
            })
            .collect();

        Self {
            name: name.into(),
            init_inventory,
            remaining_after,
        }
    }

    /// Uniform slicing over the configured horizon
    pub fn twap(config: &ExecutionConfig) -> ScheduleResult<Self> {
        let schedule = twap_schedule(config.steps, config.init_inventory as f64)?;
        Ok(Self::new("twap", &schedule, config.init_inventory))
    }

    /// Front-loaded Almgren-Chriss slicing over the configured horizon
    pub fn almgren_chriss(config: &ExecutionConfig, params: &AlmgrenChrissParams) -> ScheduleResult<Self> {
        let schedule = almgren_chriss_schedule(config.steps, config.init_inventory as f64, params)?;
        Ok(Self::new("almgren_chriss", &schedule, config.init_inventory))
    }

    pub fn horizon(&self) -> usize {
        self.remaining_after.len()
    }
}

impl Agent<ExecutionEnv> for ScheduleAgent {
    fn choose_action(&mut self, observation: &ExecutionObservation) -> usize {
        let remaining = observation.inventory_remaining * self.init_inventory as f64;
        if remaining <= 0.0 {
            return 0;
        }

        let t = (observation.time_elapsed * self.horizon() as f64).round() as usize;
        let target = self.remaining_after.get(t).copied().unwrap_or(0.0);
        let wanted = (remaining - target).max(0.0);
        closest_fraction(wanted / remaining)
    }

    fn learn(&mut self, _env: &mut ExecutionEnv, budget: TrainingBudget) -> AgentResult<()> {
        budget.validate()?;
        debug!("{} replays a fixed schedule, nothing to learn", self.name);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Plays the same liquidation fraction every step
#[derive(Debug, Clone)]
pub struct ConstantAgent {
    name: String,
    action: usize,
}

impl ConstantAgent {
    pub fn new(action: usize) -> Self {
        let index = action.min(ACTION_FRACTIONS.len() - 1);
        Self {
            name: format!("constant_{:.2}", ACTION_FRACTIONS[index]),
            action,
        }
    }
}

impl Agent<ExecutionEnv> for ConstantAgent {
    fn choose_action(&mut self, _observation: &ExecutionObservation) -> usize {
        self.action
    }

    fn learn(&mut self, _env: &mut ExecutionEnv, budget: TrainingBudget) -> AgentResult<()> {
        budget.validate()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Rebalances to a weight signal computed from the observed return window
#[derive(Debug, Clone)]
pub struct SignalAgent {
    signal: WeightSignal,
}

impl SignalAgent {
    pub fn new(signal: WeightSignal) -> Self {
        Self { signal }
    }

    pub fn signal(&self) -> &WeightSignal {
        &self.signal
    }
}

impl Agent<AllocationEnv> for SignalAgent {
    fn choose_action(&mut self, observation: &AllocationObservation) -> Vec<f64> {
        match self.signal.weights(observation.returns()) {
            Ok(weights) => weights,
            Err(e) => {
                warn!("{} signal failed ({}), holding equal weights", self.signal.label(), e);
                equal_weights(observation.assets())
            }
        }
    }

    fn learn(&mut self, _env: &mut AllocationEnv, budget: TrainingBudget) -> AgentResult<()> {
        budget.validate()
    }

    fn name(&self) -> &str {
        self.signal.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finlab_core::ReturnMatrix;

    fn observation(time_elapsed: f64, inventory_remaining: f64) -> ExecutionObservation {
        ExecutionObservation {
            time_elapsed,
            inventory_remaining,
            last_return: 0.0,
        }
    }

    #[test]
    fn test_closest_fraction() {
        assert_eq!(closest_fraction(0.0), 0);
        assert_eq!(closest_fraction(0.02), 0);
        assert_eq!(closest_fraction(0.04), 1);
        assert_eq!(closest_fraction(0.12), 2);
        assert_eq!(closest_fraction(0.35), 4);
        assert_eq!(closest_fraction(1.0), 4);
    }

    #[test]
    fn test_schedule_agent_tracks_cumulative_path() {
        // 5 steps of 20 shares from 100
        let mut agent = ScheduleAgent::new("twap", &[20.0; 5], 100);

        // On track at t=0: sell 20 of 100
        assert_eq!(agent.choose_action(&observation(0.0, 1.0)), 3);
        // Behind at t=2 with 90 left: schedule wants 40 left, sell 50 of 90
        assert_eq!(agent.choose_action(&observation(0.4, 0.9)), 4);
        // Ahead at t=2 with 30 left: sell 0
        assert_eq!(agent.choose_action(&observation(0.4, 0.3)), 0);
    }

    #[test]
    fn test_schedule_agent_idles_when_flat() {
        let mut agent = ScheduleAgent::new("twap", &[10.0; 10], 100);
        assert_eq!(agent.choose_action(&observation(0.5, 0.0)), 0);
    }

    #[test]
    fn test_schedule_agent_from_config() {
        let config = ExecutionConfig::default();
        let agent = ScheduleAgent::twap(&config).unwrap();
        assert_eq!(agent.horizon(), config.steps);
        assert_eq!(Agent::<ExecutionEnv>::name(&agent), "twap");

        let ac = ScheduleAgent::almgren_chriss(&config, &AlmgrenChrissParams::default()).unwrap();
        assert_eq!(ac.horizon(), config.steps);
    }

    #[test]
    fn test_constant_agent() {
        let mut agent = ConstantAgent::new(3);
        assert_eq!(agent.choose_action(&observation(0.3, 0.2)), 3);
        assert_eq!(Agent::<ExecutionEnv>::name(&agent), "constant_0.20");
    }

    #[test]
    fn test_signal_agent_survives_bad_initial_weights() {
        let mut agent = SignalAgent::new(WeightSignal::BuyAndHold {
            initial: Some(vec![1.0]),
        });
        let obs = AllocationObservation::new(ReturnMatrix::from_rows(vec![vec![0.0, 0.0]]).unwrap());
        assert_eq!(agent.choose_action(&obs), vec![0.5, 0.5]);
    }
}
