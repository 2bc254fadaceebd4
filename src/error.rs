//! Error types for the scoring engine

use thiserror::Error;

/// Errors surfaced by `ScoringEngine` operations
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid study session: {0}")]
    InvalidSession(String),

    #[error("Invalid daily rollup: {0}")]
    InvalidRollup(String),

    #[error("Store error: {0:#}")]
    Store(#[from] anyhow::Error),
}

impl EngineError {
    /// Validation failures are the caller's to fix and are never retried.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidSession(_) | EngineError::InvalidRollup(_)
        )
    }
}
