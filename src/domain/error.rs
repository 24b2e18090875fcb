//! Validation errors raised by the analytics domain.
//!
//! Degenerate data (empty histories, zero stakes, missing odds) is never an
//! error here: those inputs produce neutral results. Only caller-supplied
//! parameters that make a model meaningless are rejected.

use thiserror::Error;

/// Errors returned by domain entry points that validate caller parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    /// A parameter that must be strictly positive and finite was not.
    #[error("{name} must be strictly positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    /// The requested simulation count exceeds the configured bound.
    #[error("requested {requested} simulations, maximum is {max}")]
    TooManySimulations { requested: usize, max: usize },

    /// Any other malformed input.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Reject values that are zero, negative, NaN or infinite.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64, AnalyticsError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(AnalyticsError::NonPositive { name, value })
    }
}
