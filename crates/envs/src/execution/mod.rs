//! Single-asset liquidation simulator

mod env;
mod mid_price;
mod state;

pub use env::{ACTION_FRACTIONS, ExecutionEnv, ExecutionInfo};
pub use state::{EpisodeState, REFERENCE_MID};
