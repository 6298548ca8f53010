//! Finlab Baselines
//!
//! Non-learned comparators for the simulators:
//!
//! - **Schedules**: TWAP, VWAP and a simplified Almgren-Chriss schedule, each
//!   a pure function returning per-step quantities that sum to the order size.
//! - **Signals**: equal-weight, buy-and-hold, momentum and reversal weights,
//!   always on the simplex.
//! - **Policies**: agents that replay those schedules and signals through
//!   [`finlab_envs::ExecutionEnv`] and [`finlab_envs::AllocationEnv`].

pub mod error;
pub mod policies;
pub mod schedule;
pub mod signals;

pub use error::{ScheduleError, ScheduleResult};
pub use policies::{ConstantAgent, ScheduleAgent, SignalAgent, closest_fraction};
pub use schedule::{AlmgrenChrissParams, almgren_chriss_schedule, twap_schedule, vwap_schedule};
pub use signals::{
    WeightSignal, buy_and_hold, equal_weight, momentum_signal, reversal_signal,
};
