//! Probe samples and the rolling window the classifier reads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::classify::ClassifyError;

/// Tri-axis acceleration plus the probe's own peak magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Acceleration {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Scalar summary of motion, used as the stillness proxy.
    pub peak_acceleration: f32,
}

/// One reading from the probe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Sample {
    /// Probe temperature (°C).
    pub temperature: f32,
    /// Probe relative humidity (%RH).
    pub humidity: f32,
    pub acceleration: Acceleration,
}

impl Sample {
    /// Name of the first field holding NaN or an infinity, if any.
    fn first_non_finite_field(&self) -> Option<&'static str> {
        [
            ("temperature", self.temperature),
            ("humidity", self.humidity),
            ("x", self.acceleration.x),
            ("y", self.acceleration.y),
            ("z", self.acceleration.z),
            ("peak_acceleration", self.acceleration.peak_acceleration),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite())
        .map(|(name, _)| name)
    }
}

/// The most recent samples from one probe, stored newest-first.
///
/// A window always holds at least one sample and every value in it is
/// finite; both are checked on construction. Trend analysis wants the
/// opposite order, so the temperature and humidity accessors hand out
/// oldest-first series.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleWindow {
    samples: Vec<Sample>,
}

impl SampleWindow {
    /// Build a window from samples ordered newest-first, the order the
    /// probe feed delivers them in.
    pub fn from_newest_first(samples: Vec<Sample>) -> Result<Self, ClassifyError> {
        if samples.is_empty() {
            return Err(ClassifyError::EmptyWindow);
        }

        for (index, sample) in samples.iter().enumerate() {
            if let Some(field) = sample.first_non_finite_field() {
                return Err(ClassifyError::NonFiniteSample { index, field });
            }
        }

        Ok(Self { samples })
    }

    /// Build a window from samples ordered oldest-first.
    pub fn from_oldest_first(mut samples: Vec<Sample>) -> Result<Self, ClassifyError> {
        samples.reverse();
        Self::from_newest_first(samples)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the window holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The newest sample.
    pub fn current(&self) -> &Sample {
        &self.samples[0]
    }

    pub fn newest_first(&self) -> &[Sample] {
        &self.samples
    }

    pub fn temperatures_oldest_first(&self) -> Vec<f32> {
        self.samples.iter().rev().map(|s| s.temperature).collect()
    }

    pub fn humidities_oldest_first(&self) -> Vec<f32> {
        self.samples.iter().rev().map(|s| s.humidity).collect()
    }

    pub fn peak_accelerations_newest_first(&self) -> Vec<f32> {
        self.samples
            .iter()
            .map(|s| s.acceleration.peak_acceleration)
            .collect()
    }
}
