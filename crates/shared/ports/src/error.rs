use thiserror::Error;

/// Errors reported by an agent's training entry point
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    #[error("Training budget allows no environment steps")]
    EmptyBudget,
}

pub type AgentResult<T> = std::result::Result<T, AgentError>;
