//! Error types for bass-polars

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("{0}")]
    Core(#[from] bass_core::Error),

    #[error("Invalid column: {0}")]
    InvalidColumn(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the failure came from fitting the statistical model
    pub fn is_analysis_failure(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_analysis_failure())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
