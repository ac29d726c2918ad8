//! Runs one classification end to end: optional baseline refresh, window
//! fetch, analysis, decision.
//!
//! Shared across request handlers. The session and the liveness monitor
//! each sit behind their own lock, taken only around synchronous updates and
//! never held across an await.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use strum::Display;
use utoipa::ToSchema;

use crate::classify::{ClassificationResult, ClassifierConfig, MouthState, Session};
use crate::error::{Error, Result};
use crate::source::{BaselineProvider, SampleSource, SourceError};
use crate::tracing::prelude::*;
use crate::types::{Baseline, LivenessMonitor, LivenessStatus, SampleWindow};

/// Device status as reported to clients.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Display, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DeviceState {
    /// No classification has succeeded yet.
    Unknown,
    /// The probe feed has failed repeatedly.
    NotResponding,
    InMouth,
    OutOfMouth,
}

/// Point-in-time view of the orchestrator's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SessionSnapshot {
    pub device_state: DeviceState,
    pub previous: MouthState,
    pub baseline: Baseline,
    pub classifications: u64,
}

pub struct Orchestrator {
    source: Box<dyn SampleSource>,
    baseline_provider: Box<dyn BaselineProvider>,
    session: Mutex<Session>,
    liveness: Mutex<LivenessMonitor>,
}

impl Orchestrator {
    pub fn new(
        config: ClassifierConfig,
        source: Box<dyn SampleSource>,
        baseline_provider: Box<dyn BaselineProvider>,
        liveness_threshold: u32,
    ) -> Self {
        Self {
            source,
            baseline_provider,
            session: Mutex::new(Session::new(config)),
            liveness: Mutex::new(LivenessMonitor::new(liveness_threshold)),
        }
    }

    /// The cached baseline.
    pub fn baseline(&self) -> Baseline {
        self.session.lock().baseline()
    }

    /// Ask the provider for fresh ambient readings.
    ///
    /// On failure the last known baseline stays in place. Returns whichever
    /// baseline is cached afterwards.
    pub async fn refresh_baseline(&self) -> Baseline {
        match self.baseline_provider.refresh_baseline().await {
            Ok(baseline) => {
                info!(
                    ambient_temp_c = ?baseline.ambient_temperature,
                    ambient_humidity_pct = ?baseline.ambient_humidity,
                    "Ambient baseline updated"
                );
                let mut session = self.session.lock();
                session.set_baseline(baseline);
                baseline
            }
            Err(e) => {
                let kept = self.baseline();
                warn!(
                    error = %e,
                    baseline_set = kept.is_set(),
                    "Ambient baseline refresh failed, keeping last known"
                );
                kept
            }
        }
    }

    /// Run one classification.
    ///
    /// With `refresh_baseline` set, fresh ambient readings are requested
    /// first. A failed window fetch aborts the call.
    pub async fn classify(&self, refresh_baseline: bool) -> Result<ClassificationResult> {
        if refresh_baseline {
            self.refresh_baseline().await;
        }

        let count = self.session.lock().config().trend_window_size;

        let samples = match self.source.fetch_window(count).await {
            Ok(samples) => {
                self.record_fetch(Ok(()));
                samples
            }
            Err(e) => {
                self.record_fetch(Err(&e));
                return Err(Error::WindowUnavailable(e));
            }
        };

        let window = SampleWindow::from_newest_first(samples)?;
        let result = self.session.lock().classify(&window)?;

        Ok(result)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let lost = self.liveness.lock().is_lost();
        let session = self.session.lock();

        let device_state = if lost {
            DeviceState::NotResponding
        } else if session.classifications() == 0 {
            DeviceState::Unknown
        } else {
            match session.previous() {
                MouthState::InMouth => DeviceState::InMouth,
                MouthState::OutOfMouth => DeviceState::OutOfMouth,
            }
        };

        SessionSnapshot {
            device_state,
            previous: session.previous(),
            baseline: session.baseline(),
            classifications: session.classifications(),
        }
    }

    fn record_fetch(&self, outcome: std::result::Result<(), &SourceError>) {
        let status = self.liveness.lock().record(outcome.is_ok());

        match (status, outcome) {
            (LivenessStatus::Recovered, _) => info!("Probe feed responding again"),
            (LivenessStatus::Lost, Err(e)) => {
                error!(error = %e, "Probe feed not responding")
            }
            (LivenessStatus::Faltering | LivenessStatus::StillLost, Err(e)) => {
                warn!(error = %e, "Sample window fetch failed")
            }
            _ => {}
        }
    }
}
