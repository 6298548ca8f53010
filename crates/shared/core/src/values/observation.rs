use serde::Serialize;

use super::ReturnMatrix;

/// What the liquidation agent sees before each decision
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ExecutionObservation {
    /// Fraction of the horizon already elapsed
    pub time_elapsed: f64,
    /// Fraction of the initial inventory still held
    pub inventory_remaining: f64,
    /// Last realised mid-price log-return (0 before any move)
    pub last_return: f64,
}

impl ExecutionObservation {
    pub fn to_array(&self) -> [f64; 3] {
        [self.time_elapsed, self.inventory_remaining, self.last_return]
    }
}

/// Trailing window of log-returns seen by the rebalancing agent
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationObservation {
    returns: ReturnMatrix,
}

impl AllocationObservation {
    pub fn new(returns: ReturnMatrix) -> Self {
        Self { returns }
    }

    pub fn returns(&self) -> &ReturnMatrix {
        &self.returns
    }

    /// Number of rows in the window
    pub fn window(&self) -> usize {
        self.returns.periods()
    }

    pub fn assets(&self) -> usize {
        self.returns.assets()
    }
}
