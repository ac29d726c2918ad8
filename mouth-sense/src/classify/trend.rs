//! Directional run lengths of temperature and humidity.
//!
//! Each step compares `previous - current` over an oldest-to-newest series.
//! A positive difference means the signal *fell* going forward in time, yet
//! it is counted as "increasing". That naming is inherited and the decision
//! rules are tuned against it, so the arithmetic is kept literal: with
//! oldest-first input, "increasing" tracks cooling/drying runs and
//! "decreasing" tracks warming/moistening runs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::config::ClassifierConfig;

/// Final counter values after walking the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TrendCounts {
    pub temp_increasing: u32,
    pub temp_decreasing: u32,
    pub humidity_increasing: u32,
    pub humidity_decreasing: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TrendResult {
    pub increasing: bool,
    pub decreasing: bool,
    pub counts: TrendCounts,
}

/// Paired run-length counters for one signal.
///
/// A step past the threshold in one direction extends that run and clears
/// the other. A flat step (within the threshold) leaves both alone.
#[derive(Debug, Default)]
struct RunLengths {
    increasing: u32,
    decreasing: u32,
}

impl RunLengths {
    fn step(&mut self, previous: f32, current: f32, threshold: f32) {
        let diff = previous - current;
        if diff > threshold {
            self.increasing += 1;
            self.decreasing = 0;
        } else if diff < -threshold {
            self.decreasing += 1;
            self.increasing = 0;
        }
    }
}

/// Analyze oldest-to-newest temperature and humidity series.
///
/// Both series must have the same length. With fewer than two samples every
/// counter is zero and both flags are false. Both flags may be set at once
/// when the two signals move in opposite directions.
pub fn analyze_trends(
    temperatures: &[f32],
    humidities: &[f32],
    config: &ClassifierConfig,
) -> TrendResult {
    debug_assert_eq!(temperatures.len(), humidities.len());

    let threshold = config.derivative_threshold;
    let mut temp = RunLengths::default();
    let mut humidity = RunLengths::default();

    for (t, h) in temperatures.windows(2).zip(humidities.windows(2)) {
        temp.step(t[0], t[1], threshold);
        humidity.step(h[0], h[1], threshold);
    }

    TrendResult {
        increasing: temp.increasing >= config.min_increasing_samples
            || humidity.increasing >= config.min_increasing_samples,
        decreasing: temp.decreasing >= config.min_decreasing_samples
            || humidity.decreasing >= config.min_decreasing_samples,
        counts: TrendCounts {
            temp_increasing: temp.increasing,
            temp_decreasing: temp.decreasing,
            humidity_increasing: humidity.increasing,
            humidity_decreasing: humidity.decreasing,
        },
    }
}
