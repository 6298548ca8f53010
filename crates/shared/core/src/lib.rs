//! Finlab Core Domain
//!
//! Pure domain types for the finlab market simulators.
//! This crate contains no I/O beyond parsing in-memory JSON and is 100% unit testable.

pub mod config;
pub mod error;
pub mod spaces;
pub mod step;
pub mod values;

// Re-export commonly used types at crate root
pub use config::{
    AllocationConfig, AllocationReward, ExecutionConfig, ExecutionReward, PriceProcess,
};
pub use error::{ConfigError, ConfigResult, DataError, DataResult};
pub use spaces::Space;
pub use step::Step;
pub use values::{
    AllocationObservation, ExecutionObservation, PriceMatrix, ReturnMatrix, equal_weights,
    project_to_simplex, turnover,
};
