//! Crate-level error type.

use crate::classify::ClassifyError;
use crate::source::SourceError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The sample feed could not be read; no classification is possible.
    #[error("Sample window unavailable: {0}")]
    WindowUnavailable(#[source] SourceError),

    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error("Configuration error: {0}")]
    Config(String),
}
