/// Outcome of one `step` call
#[derive(Debug, Clone, PartialEq)]
pub struct Step<O, I> {
    /// Observation after the transition
    pub observation: O,
    /// Reward for the transition
    pub reward: f64,
    /// Episode reached a terminal state
    pub terminated: bool,
    /// Episode was cut short (never set by the built-in simulators)
    pub truncated: bool,
    /// Simulator-specific diagnostics
    pub info: I,
}

impl<O, I> Step<O, I> {
    pub fn is_done(&self) -> bool {
        self.terminated || self.truncated
    }
}
