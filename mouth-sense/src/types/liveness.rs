//! Tracks whether the probe feed is still answering.
//!
//! Classification is request-driven, so liveness is judged by consecutive
//! failed window fetches rather than wall-clock time.
//!
//! # State Machine
//!
//! ```text
//!             record(false)             failures >= threshold
//!  Responding ─────────────► Failing(n) ─────────────────────► Lost
//!   ▲                          │                                 │
//!   │      record(true)        │                                 │
//!   └──────────────────────────┘                                 │
//!   ▲                                 record(true)               │
//!   └────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **Responding:** The last fetch succeeded.
//! - **Failing:** Some fetches have failed in a row, not enough to give up.
//! - **Lost:** The feed is considered down. The device is reported as not
//!   responding until a fetch succeeds again.

/// Result of [`LivenessMonitor::record`], describing the current state and
/// any transition that just occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LivenessStatus {
    /// Fetch succeeded and the feed was healthy before.
    Responding,

    /// Fetch failed, below the threshold.
    Faltering,

    /// Threshold just reached. Returned exactly once per outage.
    Lost,

    /// Still down. Suppressed.
    StillLost,

    /// First success after an outage. Returned exactly once.
    Recovered,
}

#[derive(Debug)]
enum State {
    Responding,
    Failing(u32),
    Lost,
}

/// Consecutive-failure counter with a one-shot "lost" edge.
#[derive(Debug)]
pub struct LivenessMonitor {
    threshold: u32,
    state: State,
}

impl LivenessMonitor {
    /// Create a monitor that declares the feed lost after `threshold`
    /// consecutive failures. A threshold of zero is treated as one.
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            state: State::Responding,
        }
    }

    /// Record the outcome of one fetch.
    ///
    /// | Previous state | fetched | Result |
    /// |----------------|---------|--------|
    /// | Responding | true | `Responding` |
    /// | Responding | false | `Faltering` or `Lost` |
    /// | Failing | true | `Responding` (clears count) |
    /// | Failing | false | `Faltering` or `Lost` |
    /// | Lost | true | `Recovered` |
    /// | Lost | false | `StillLost` |
    pub fn record(&mut self, fetched: bool) -> LivenessStatus {
        match (&self.state, fetched) {
            (State::Responding | State::Failing(_), true) => {
                self.state = State::Responding;
                LivenessStatus::Responding
            }

            (State::Responding, false) => self.fail(1),

            (State::Failing(n), false) => {
                let failures = n + 1;
                self.fail(failures)
            }

            (State::Lost, true) => {
                self.state = State::Responding;
                LivenessStatus::Recovered
            }

            (State::Lost, false) => LivenessStatus::StillLost,
        }
    }

    pub fn is_lost(&self) -> bool {
        matches!(self.state, State::Lost)
    }

    fn fail(&mut self, failures: u32) -> LivenessStatus {
        if failures >= self.threshold {
            self.state = State::Lost;
            LivenessStatus::Lost
        } else {
            self.state = State::Failing(failures);
            LivenessStatus::Faltering
        }
    }
}
