//! Finlab Simulators
//!
//! Two discrete-time Markov decision processes with transaction costs and
//! price impact:
//!
//! - **Execution**: liquidate a single-asset inventory over a fixed horizon.
//!   Discrete actions pick a fraction of the remaining inventory; the reward
//!   is paid once, at termination, as the negative implementation shortfall.
//! - **Allocation**: rebalance a multi-asset portfolio every `k` periods of a
//!   precomputed log-return matrix. Continuous actions are projected onto the
//!   simplex; the reward is paid at every rebalance.
//!
//! Both implement [`finlab_ports::Environment`]. Each instance owns its
//! episode state and its random generator; price data is shared read-only.

pub mod allocation;
pub mod execution;

pub use allocation::{AllocationEnv, AllocationInfo, AllocationState};
pub use execution::{
    ACTION_FRACTIONS, EpisodeState, ExecutionEnv, ExecutionInfo, REFERENCE_MID,
};
