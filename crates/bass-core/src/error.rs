//! Error types for BASS reporting
//!
//! Provides a unified error type for all bass-* crates.

use thiserror::Error;

/// Core error type for reporting operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Statistical model could not be fitted
    #[error("Analysis error in {stage}: {message}")]
    Analysis { stage: String, message: String },

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an analysis failure for a named stage
    pub fn analysis(stage: &str, message: impl Into<String>) -> Self {
        Self::Analysis {
            stage: stage.to_string(),
            message: message.into(),
        }
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Whether this error came from a model fit rather than bad input
    pub fn is_analysis_failure(&self) -> bool {
        matches!(self, Self::Analysis { .. })
    }
}
