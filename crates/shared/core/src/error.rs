use thiserror::Error;

/// Errors raised while building a simulator configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("Not enough price history: need at least {required} rows, got {actual}")]
    InsufficientHistory { required: usize, actual: usize },
}

impl ConfigError {
    pub(crate) fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key,
            reason: reason.into(),
        }
    }
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Errors raised while building a price or return matrix
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("Price matrix is empty")]
    Empty,

    #[error("Row {row} has {actual} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Non-finite value at row {row}, column {col}")]
    NonFinite { row: usize, col: usize },

    #[error("Non-positive price {value} at row {row}, column {col}")]
    NonPositive { row: usize, col: usize, value: f64 },

    #[error("Failed to load price data: {0}")]
    Source(String),
}

pub type DataResult<T> = std::result::Result<T, DataError>;
