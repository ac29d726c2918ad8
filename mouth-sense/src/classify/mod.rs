//! The classification core.
//!
//! Three pure analyses of a [`SampleWindow`](crate::types::SampleWindow)
//! and the ambient baseline feed a hysteretic two-state decision. Only the
//! decision carries memory, and it lives in a caller-owned [`Session`].

mod config;
mod session;
mod state;
mod stillness;
mod threshold;
mod trend;

pub use config::ClassifierConfig;
pub use session::{ClassificationResult, Session, classify};
pub use state::{Decision, DecisionInputs, DecisionReason, MouthState};
pub use stillness::{is_still, stable_run_length};
pub use threshold::{ThresholdResult, evaluate_thresholds};
pub use trend::{TrendCounts, TrendResult, analyze_trends};

/// Reasons a single classification call is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    #[error("Ambient baseline has not been set")]
    MissingBaseline,

    #[error("Ambient baseline contains a non-finite value")]
    NonFiniteBaseline,

    #[error("Sample window is empty")]
    EmptyWindow,

    #[error("Sample {index} has a non-finite {field}")]
    NonFiniteSample { index: usize, field: &'static str },
}
