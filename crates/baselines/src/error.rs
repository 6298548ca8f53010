use thiserror::Error;

/// Misuse of a baseline generator that has no meaningful answer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("Schedule horizon must be at least one step")]
    ZeroHorizon,

    #[error("Volume profile is empty")]
    EmptyProfile,

    #[error("Volume profile sums to {0}, expected a positive total")]
    DegenerateProfile(f64),

    #[error("Invalid value for '{name}': {value}")]
    InvalidValue { name: &'static str, value: f64 },

    #[error("Weight signal needs at least one asset")]
    NoAssets,

    #[error("Initial weights have {actual} entries for {expected} assets")]
    AssetMismatch { expected: usize, actual: usize },
}

pub type ScheduleResult<T> = std::result::Result<T, ScheduleError>;

/// Reject negative and non-finite inputs
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> ScheduleResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ScheduleError::InvalidValue { name, value });
    }
    Ok(())
}
