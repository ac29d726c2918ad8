//! API data transfer objects.
//!
//! These types define the API contract shared between the server and
//! clients.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::classify::{
    ClassificationResult, DecisionReason, MouthState, ThresholdResult, TrendResult,
};

pub use crate::orchestrator::{DeviceState, SessionSnapshot};

/// Body of a classification request.
#[derive(Clone, Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ClassificationRequest {
    /// Refresh the ambient baseline before classifying.
    #[serde(default)]
    pub update_environment: bool,
}

/// Outcome of one classification with the readings it was based on.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct Classification {
    pub in_mouth: bool,
    pub state: MouthState,
    pub reason: DecisionReason,
    /// Probe temperature (°C).
    pub temperature: f32,
    /// Probe relative humidity (%RH).
    pub humidity: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub peak_acceleration: f32,
    pub environmental_temperature: f32,
    pub environmental_humidity: f32,
    pub trends: TrendResult,
    pub thresholds_met: ThresholdResult,
    pub is_motion_still: bool,
}

impl From<&ClassificationResult> for Classification {
    fn from(result: &ClassificationResult) -> Self {
        let current = &result.current;
        Self {
            in_mouth: result.in_mouth(),
            state: result.state,
            reason: result.reason,
            temperature: current.temperature,
            humidity: current.humidity,
            x: current.acceleration.x,
            y: current.acceleration.y,
            z: current.acceleration.z,
            peak_acceleration: current.acceleration.peak_acceleration,
            environmental_temperature: result.ambient.temperature,
            environmental_humidity: result.ambient.humidity,
            trends: result.trends,
            thresholds_met: result.thresholds,
            is_motion_still: result.still,
        }
    }
}

/// Error body returned with any non-2xx status.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
