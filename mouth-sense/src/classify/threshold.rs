use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::config::ClassifierConfig;
use crate::types::Ambient;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ThresholdResult {
    pub temperature_met: bool,
    pub humidity_met: bool,
}

impl ThresholdResult {
    pub fn both(&self) -> bool {
        self.temperature_met && self.humidity_met
    }

    pub fn either(&self) -> bool {
        self.temperature_met || self.humidity_met
    }
}

/// Compare the current reading against the sustained-presence thresholds.
///
/// Temperature is judged relative to ambient; humidity against an absolute
/// level.
pub fn evaluate_thresholds(
    temperature: f32,
    humidity: f32,
    ambient: &Ambient,
    config: &ClassifierConfig,
) -> ThresholdResult {
    ThresholdResult {
        temperature_met: temperature - ambient.temperature >= config.temp_threshold,
        humidity_met: humidity >= config.humidity_threshold,
    }
}
