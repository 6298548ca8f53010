use finlab_core::{Space, Step};

/// Port for a finite-horizon market simulator
///
/// Each simulator is a concrete implementation owning its episode state.
/// Neither `reset` nor `step` can fail once the simulator has been built:
/// invalid raw actions are clipped or renormalised, never rejected.
pub trait Environment {
    /// Action chosen by the agent
    type Action;

    /// Observation handed to the agent
    type Observation: Clone;

    /// Simulator-specific step diagnostics
    type Info;

    /// Start a new episode, optionally reseeding the random generator
    fn reset(&mut self, seed: Option<u64>) -> Self::Observation;

    /// Advance one decision step
    fn step(&mut self, action: Self::Action) -> Step<Self::Observation, Self::Info>;

    /// Valid actions
    fn action_space(&self) -> Space;

    /// Shape and bounds of observations
    fn observation_space(&self) -> Space;

    /// Get the simulator's name (for logging)
    fn name(&self) -> &str {
        "Environment"
    }
}
