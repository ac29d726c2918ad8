//! Ambient (environmental) reference readings.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::classify::ClassifyError;

/// Cached ambient readings, either of which may not have arrived yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Baseline {
    /// Ambient temperature (°C).
    pub ambient_temperature: Option<f32>,
    /// Ambient relative humidity (%RH).
    pub ambient_humidity: Option<f32>,
}

/// A baseline with both readings present and finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Ambient {
    pub temperature: f32,
    pub humidity: f32,
}

impl Baseline {
    pub fn new(ambient_temperature: f32, ambient_humidity: f32) -> Self {
        Self {
            ambient_temperature: Some(ambient_temperature),
            ambient_humidity: Some(ambient_humidity),
        }
    }

    pub fn is_set(&self) -> bool {
        self.ambient_temperature.is_some() && self.ambient_humidity.is_some()
    }

    /// Resolve to concrete readings.
    ///
    /// An unset reading is an error, never an implicit zero.
    pub fn resolve(&self) -> Result<Ambient, ClassifyError> {
        let (Some(temperature), Some(humidity)) = (self.ambient_temperature, self.ambient_humidity)
        else {
            return Err(ClassifyError::MissingBaseline);
        };

        if !temperature.is_finite() || !humidity.is_finite() {
            return Err(ClassifyError::NonFiniteBaseline);
        }

        Ok(Ambient {
            temperature,
            humidity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_start_unset() {
        let baseline = Baseline::default();

        assert!(!baseline.is_set());
        assert_eq!(baseline.resolve(), Err(ClassifyError::MissingBaseline));
    }

    #[test]
    fn should_fail_when_only_temperature_is_known() {
        let baseline = Baseline {
            ambient_temperature: Some(22.0),
            ambient_humidity: None,
        };

        assert_eq!(baseline.resolve(), Err(ClassifyError::MissingBaseline));
    }

    #[test]
    fn should_reject_non_finite_readings() {
        let baseline = Baseline::new(f32::NAN, 40.0);

        assert_eq!(baseline.resolve(), Err(ClassifyError::NonFiniteBaseline));
    }

    #[test]
    fn should_resolve_when_both_readings_are_known() {
        let baseline = Baseline::new(22.0, 40.0);

        assert_eq!(
            baseline.resolve(),
            Ok(Ambient {
                temperature: 22.0,
                humidity: 40.0
            })
        );
    }
}
