//! Error types for Underwriter Core

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnderwriterError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Score out of range for {field}: {value} (expected 0-100)")]
    ScoreOutOfRange { field: String, value: f64 },

    #[error("Duplicate position for protocol: {0}")]
    DuplicatePosition(String),
}

pub type UnderwriterResult<T> = Result<T, UnderwriterError>;

/// Reject a score that is NaN or outside the 0-100 scale.
pub fn check_score(field: &str, value: f64) -> UnderwriterResult<()> {
    if !(0.0..=100.0).contains(&value) {
        return Err(UnderwriterError::ScoreOutOfRange {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}
