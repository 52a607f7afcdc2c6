//! Error type shared by the tester, sampler, harness and their I/O helpers.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MajorityError>;

/// Errors raised while testing, sampling or exporting convergence data.
#[derive(Debug, Error)]
pub enum MajorityError {
    #[error("invalid input: {0}")]
    /// A precondition on the caller's input was violated.
    InvalidInput(String),
    #[error("no element accepted within {limit} draws")]
    /// The optional draw cap was exhausted before the tester accepted a value.
    DrawLimitExceeded {
        /// Configured maximum number of draws per trial.
        limit: u64,
    },
    #[error("io error: {0}")]
    /// Underlying filesystem failure.
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    /// Serialization or config decoding failure.
    Json(#[from] serde_json::Error),
}

impl MajorityError {
    /// Builds an [`MajorityError::InvalidInput`] from any message.
    pub fn invalid(message: impl Into<String>) -> Self {
        MajorityError::InvalidInput(message.into())
    }

    /// Returns `true` for precondition violations.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, MajorityError::InvalidInput(_))
    }
}
