//! Simulator configuration
//!
//! Every recognised option is an explicit field with a documented default.
//! Configurations deserialize from an option mapping (a JSON object) and are
//! validated once, at construction of the simulator that owns them.

mod allocation;
mod execution;

pub use allocation::{AllocationConfig, AllocationReward};
pub use execution::{ExecutionConfig, ExecutionReward, PriceProcess};

use crate::error::ConfigError;

pub(crate) fn ensure_non_negative(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::invalid(
            key,
            format!("must be finite and >= 0, got {}", value),
        ));
    }
    Ok(())
}

pub(crate) fn ensure_finite(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::invalid(
            key,
            format!("must be finite, got {}", value),
        ));
    }
    Ok(())
}
