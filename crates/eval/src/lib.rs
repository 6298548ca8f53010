//! Finlab Evaluation
//!
//! Scores agents against the simulators.
//!
//! ```text
//! agent + simulator --(N episodes)--> episode outcomes --(metrics)--> report
//! ```
//!
//! - [`metrics`]: implementation shortfall, Sharpe ratio, max drawdown
//! - [`RolloutEvaluator`]: sequential rollouts for both simulators and a
//!   worker-parallel rollout for the liquidation simulator

pub mod config;
pub mod error;
pub mod metrics;
pub mod report;
pub mod rollout;

pub use config::EvalConfig;
pub use error::{EvalError, EvalResult};
pub use metrics::{SHARPE_EPSILON, implementation_shortfall, max_drawdown, mean, sharpe, std_dev};
pub use report::{AllocationEpisode, AllocationReport, ExecutionEpisode, ExecutionReport};
pub use rollout::RolloutEvaluator;
