//! Error type surfaced by the videojuego service.

use thiserror::Error;

/// Failures reported by [`crate::service::VideojuegoService`].
#[derive(Debug, Error)]
pub enum VideojuegoError {
    /// A registration argument failed validation.
    #[error("invalid argument `{field}`: {reason}")]
    InvalidArgument {
        /// Name of the rejected argument.
        field: &'static str,
        /// Human readable explanation.
        reason: String,
    },
    /// A score fell outside the classifiable range.
    #[error("score {score} is out of range (expected 0..=100)")]
    OutOfRange {
        /// The rejected score.
        score: i32,
    },
    /// The backing repository failed.
    #[error("repository failure: {0:#}")]
    Repository(#[source] anyhow::Error),
}

impl VideojuegoError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    /// True for both argument kinds, letting callers treat them as one
    /// "illegal argument" failure.
    pub fn is_illegal_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. } | Self::OutOfRange { .. })
    }
}

/// Result alias used across the service API.
pub type Result<T> = std::result::Result<T, VideojuegoError>;
