//! Error types for bass-viz

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Nothing to draw: {0}")]
    Empty(String),

    #[error("Rendering failed: {0}")]
    Render(String),
}

impl<E> From<DrawingAreaErrorKind<E>> for Error
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        Self::Render(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
