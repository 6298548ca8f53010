//! Finlab Ports
//!
//! Port definitions (traits) for the finlab simulators.
//! These define the boundaries between the simulators and their external
//! collaborators: learning agents and price-data providers.

mod agent;
mod environment;
mod error;
mod price_source;

pub use agent::{Agent, TrainingBudget};
pub use environment::Environment;
pub use error::{AgentError, AgentResult};
pub use price_source::PriceSource;
