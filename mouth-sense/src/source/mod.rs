//! Collaborators that feed the classifier.
//!
//! The classifier itself does no I/O. A [`SampleSource`] supplies the most
//! recent probe readings and a [`BaselineProvider`] supplies fresh ambient
//! readings on request.

#[cfg(test)]
pub(crate) mod fake;
mod http;

use async_trait::async_trait;

use crate::types::{Baseline, Sample};

pub use http::{HttpBaselineProvider, HttpSampleSource};

/// Errors from fetching samples or ambient readings.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Decode(String),
}

/// Supplies the probe's most recent samples.
#[async_trait]
pub trait SampleSource: Send + Sync {
    /// Fetch up to `count` samples, newest first.
    async fn fetch_window(&self, count: usize) -> Result<Vec<Sample>, SourceError>;
}

/// Supplies ambient temperature and humidity.
#[async_trait]
pub trait BaselineProvider: Send + Sync {
    /// Take a fresh ambient reading. Both values are present on success.
    async fn refresh_baseline(&self) -> Result<Baseline, SourceError>;
}
