//! Finlab Runner - Baseline Comparison Experiments
//!
//! Wires the workspace together:
//!
//! - **Settings**: one JSON file with execution, allocation, data, eval and
//!   baseline sections
//! - **Data**: synthetic GBM prices or a JSON price file
//! - **Experiment**: every baseline agent through both simulators
//!
//! ## Architecture
//!
//! ```text
//!          ┌──────────────────┐         ┌──────────────────┐
//!          │  RunnerSettings  │         │   PriceSource    │
//!          └────────┬─────────┘         └────────┬─────────┘
//!                   │ configs                    │ prices
//!                   ▼                            ▼
//!  ┌────────────────────────────┐  ┌────────────────────────────┐
//!  │        ExecutionEnv        │  │       AllocationEnv        │
//!  │  twap / almgren_chriss /   │  │  equal / buy_and_hold /    │
//!  │  constant agents           │  │  momentum / reversal       │
//!  └─────────────┬──────────────┘  └─────────────┬──────────────┘
//!                │ episodes                      │ episodes
//!                └──────────────┬────────────────┘
//!                               ▼
//!                   ┌───────────────────────┐
//!                   │   RolloutEvaluator    │
//!                   └───────────┬───────────┘
//!                               ▼
//!                   ┌───────────────────────┐
//!                   │   ExperimentReport    │
//!                   └───────────────────────┘
//! ```

pub mod data;
pub mod error;
pub mod experiment;
pub mod settings;

pub use data::{JsonFilePriceSource, SyntheticPriceSource, price_source};
pub use error::{RunnerError, RunnerResult};
pub use experiment::{DataSummary, Experiment, ExperimentReport};
pub use settings::{BaselineSettings, DataSettings, RunnerSettings, SyntheticSettings};
