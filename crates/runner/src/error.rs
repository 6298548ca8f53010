use finlab_baselines::ScheduleError;
use finlab_core::{ConfigError, DataError};
use finlab_eval::EvalError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Price data error: {0}")]
    Data(#[from] DataError),

    #[error("Baseline error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),
}

pub type RunnerResult<T> = std::result::Result<T, RunnerError>;
