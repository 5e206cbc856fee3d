//! Error taxonomy for the simulation core

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// `tick` or input was called before a game was started
    #[error("no active game; start a new game first")]
    NoActiveGame,
    /// Internal corruption detected by `GameState::check_invariants`
    #[error("invariant violated: {detail}")]
    InvariantViolation { detail: String },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    pub(crate) fn invariant(detail: impl Into<String>) -> Self {
        Self::InvariantViolation {
            detail: detail.into(),
        }
    }
}
