use finlab_core::ConfigError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Rollout needs at least one episode")]
    NoEpisodes,

    #[error("Failed to build rollout worker: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to start worker pool: {0}")]
    WorkerPool(String),
}

pub type EvalResult<T> = std::result::Result<T, EvalError>;
