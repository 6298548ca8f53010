use crate::{AgentError, AgentResult, Environment};

/// Limits handed to an agent's training entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingBudget {
    /// Total environment steps the agent may consume
    pub total_steps: u64,
}

impl TrainingBudget {
    pub fn steps(total_steps: u64) -> Self {
        Self { total_steps }
    }

    pub fn validate(&self) -> AgentResult<()> {
        if self.total_steps == 0 {
            return Err(AgentError::EmptyBudget);
        }
        Ok(())
    }
}

/// Port for a trading policy driven against a simulator
///
/// The learning algorithm behind `learn` is opaque to the simulators;
/// non-learned baselines implement it as a no-op.
pub trait Agent<E: Environment> {
    /// Pick an action for the current observation
    fn choose_action(&mut self, observation: &E::Observation) -> E::Action;

    /// Train against `env` within `budget`
    fn learn(&mut self, env: &mut E, budget: TrainingBudget) -> AgentResult<()>;

    /// Get agent name (for logging/reports)
    fn name(&self) -> &str;
}
