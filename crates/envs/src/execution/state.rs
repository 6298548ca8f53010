/// Mid-price every episode starts from; also the arrival-price benchmark
pub const REFERENCE_MID: f64 = 100.0;

/// Mutable state of one liquidation episode
///
/// Owned exclusively by the simulator; `reset` replaces it wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeState {
    /// Decision steps taken so far (`0..=steps`)
    pub t: usize,
    /// Shares still held, never negative
    pub inventory: u64,
    /// Append-only mid-price history; the first entry is the benchmark price
    pub mid_history: Vec<f64>,
    /// Signed cash, debited by the notional of every fill
    pub cash: f64,
    /// Episode has terminated
    pub done: bool,
}

impl EpisodeState {
    pub fn new(init_inventory: u64, horizon: usize) -> Self {
        let mut mid_history = Vec::with_capacity(horizon + 1);
        mid_history.push(REFERENCE_MID);
        Self {
            t: 0,
            inventory: init_inventory,
            mid_history,
            cash: 0.0,
            done: false,
        }
    }

    /// Current mid-price
    pub fn mid(&self) -> f64 {
        self.mid_history
            .last()
            .copied()
            .unwrap_or(REFERENCE_MID)
    }

    /// Mid-price at the start of the episode
    pub fn reference_mid(&self) -> f64 {
        self.mid_history
            .first()
            .copied()
            .unwrap_or(REFERENCE_MID)
    }

    /// Log-return between the last two mids, 0 before the first move
    pub fn last_return(&self) -> f64 {
        match self.mid_history.as_slice() {
            [.., prev, last] => (last / prev).ln(),
            _ => 0.0,
        }
    }
}
