//! Error types for the core crate.

use thiserror::Error;

/// Result type for core operations.
pub type MisResult<T> = Result<T, MisError>;

/// Errors that can occur while building, encoding or searching a problem.
///
/// All variants are raised before any expensive work starts (except
/// [`MisError::Timeout`] on a wall-clock deadline) and are deterministic for
/// the same input, so retrying never helps.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum MisError {
    /// Malformed construction parameters or solution data.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// QUBO dimension exceeds the exhaustive-search bound.
    #[error("QUBO of dimension {size} exceeds brute-force limit of {max}")]
    Dimension { size: usize, max: usize },

    /// Exhaustive search exceeded the caller-supplied budget.
    #[error("Search budget exceeded after {evaluated} of {total} assignments")]
    Timeout { evaluated: u64, total: u64 },

    /// Sample data could not be decoded.
    #[error("Sample decode error: {0}")]
    SampleDecode(String),
}

impl MisError {
    /// Shorthand for an [`MisError::InvalidInput`] with a formatted message.
    pub fn invalid(message: impl Into<String>) -> Self {
        MisError::InvalidInput(message.into())
    }
}

impl From<serde_json::Error> for MisError {
    fn from(e: serde_json::Error) -> Self {
        MisError::SampleDecode(e.to_string())
    }
}
