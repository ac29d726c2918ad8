mod baseline;
mod liveness;
mod sample;

pub use baseline::{Ambient, Baseline};
pub use liveness::{LivenessMonitor, LivenessStatus};
pub use sample::{Acceleration, Sample, SampleWindow};
