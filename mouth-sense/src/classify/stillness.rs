//! Motion stillness from peak acceleration.

use super::config::ClassifierConfig;
use crate::types::SampleWindow;

/// Length of the trailing run of steps whose change in peak acceleration
/// stays within `threshold`.
///
/// Unlike the trend counters there is a single counter, and any larger step
/// resets it. Each step compares absolute differences, but the counter only
/// reports the run at the end of the walk, so order still matters: callers
/// pass the window newest-first.
pub fn stable_run_length(peaks: &[f32], threshold: f32) -> u32 {
    peaks.windows(2).fold(0, |run, pair| {
        if (pair[1] - pair[0]).abs() <= threshold {
            run + 1
        } else {
            0
        }
    })
}

/// Whether the probe has been motionless across the window.
pub fn is_still(window: &SampleWindow, config: &ClassifierConfig) -> bool {
    let peaks = window.peak_accelerations_newest_first();
    stable_run_length(&peaks, config.acceleration_derivative_threshold)
        >= config.min_stable_samples
}
