//! Scripted collaborators for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{BaselineProvider, SampleSource, SourceError};
use crate::types::{Acceleration, Baseline, Sample};

pub(crate) fn sample(temperature: f32, humidity: f32, peak: f32) -> Sample {
    Sample {
        temperature,
        humidity,
        acceleration: Acceleration {
            x: 0.1,
            y: 0.2,
            z: 0.9,
            peak_acceleration: peak,
        },
    }
}

/// Newest-first window of steady readings with enough motion that it never
/// counts as still.
pub(crate) fn steady_samples(temperature: f32, humidity: f32) -> Vec<Sample> {
    [1.0, 1.5, 1.0, 1.5]
        .into_iter()
        .map(|peak| sample(temperature, humidity, peak))
        .collect()
}

/// Replays queued responses, then fails with 503 once the queue is empty.
#[derive(Default)]
pub(crate) struct FakeSource {
    responses: Mutex<VecDeque<Result<Vec<Sample>, SourceError>>>,
    requested_counts: Mutex<Vec<usize>>,
}

impl FakeSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_window(self, samples: Vec<Sample>) -> Self {
        self.responses.lock().push_back(Ok(samples));
        self
    }

    pub(crate) fn push_failure(self) -> Self {
        self.responses
            .lock()
            .push_back(Err(SourceError::Status(503)));
        self
    }

    pub(crate) fn requested_counts(&self) -> Vec<usize> {
        self.requested_counts.lock().clone()
    }
}

#[async_trait]
impl SampleSource for FakeSource {
    async fn fetch_window(&self, count: usize) -> Result<Vec<Sample>, SourceError> {
        self.requested_counts.lock().push(count);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or(Err(SourceError::Status(503)))
    }
}

/// Returns a fixed reading, or fails when none was given. Counts calls.
#[derive(Default)]
pub(crate) struct FakeBaselineProvider {
    baseline: Option<Baseline>,
    calls: AtomicUsize,
}

impl FakeBaselineProvider {
    pub(crate) fn returning(baseline: Baseline) -> Self {
        Self {
            baseline: Some(baseline),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing() -> Self {
        Self::default()
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BaselineProvider for FakeBaselineProvider {
    async fn refresh_baseline(&self) -> Result<Baseline, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.baseline.ok_or(SourceError::Status(500))
    }
}

/// Lets a test keep a handle on a fake after handing it to the orchestrator.
#[async_trait]
impl<T: SampleSource> SampleSource for std::sync::Arc<T> {
    async fn fetch_window(&self, count: usize) -> Result<Vec<Sample>, SourceError> {
        (**self).fetch_window(count).await
    }
}

#[async_trait]
impl<T: BaselineProvider> BaselineProvider for std::sync::Arc<T> {
    async fn refresh_baseline(&self) -> Result<Baseline, SourceError> {
        (**self).refresh_baseline().await
    }
}
