//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid option letter: {0:?}")]
    InvalidLetter(String),

    #[error("Fuzzy threshold must lie strictly between 0 and 1, got {0}")]
    InvalidThreshold(f64),

    #[error("Malformed answer bank: {0}")]
    MalformedBank(String),
}

impl DomainError {
    /// Check if this error came from decoding an answer bank
    pub fn is_malformed_bank(&self) -> bool {
        matches!(self, DomainError::MalformedBank(_))
    }
}

/// Validate a fuzzy-match threshold (exclusive bounds on both ends).
pub fn validate_threshold(threshold: f64) -> Result<f64, DomainError> {
    if threshold > 0.0 && threshold < 1.0 {
        Ok(threshold)
    } else {
        Err(DomainError::InvalidThreshold(threshold))
    }
}
