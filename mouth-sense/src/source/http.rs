//! HTTP implementations of the feed collaborators.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use super::{BaselineProvider, SampleSource, SourceError};
use crate::tracing::prelude::*;
use crate::types::{Acceleration, Baseline, Sample};

/// One element of the probe feed's `getlatest` array.
#[derive(Debug, Deserialize)]
struct WireSample {
    humidity: WireClimate,
    accelerometer: WireAccelerometer,
}

#[derive(Debug, Deserialize)]
struct WireClimate {
    temperature: f32,
    humidity: f32,
}

#[derive(Debug, Deserialize)]
struct WireAccelerometer {
    x: f32,
    y: f32,
    z: f32,
    peak_acceleration: f32,
}

impl From<WireSample> for Sample {
    fn from(wire: WireSample) -> Self {
        Sample {
            temperature: wire.humidity.temperature,
            humidity: wire.humidity.humidity,
            acceleration: Acceleration {
                x: wire.accelerometer.x,
                y: wire.accelerometer.y,
                z: wire.accelerometer.z,
                peak_acceleration: wire.accelerometer.peak_acceleration,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireEnvironmentResponse {
    body: WireEnvironment,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEnvironment {
    environmental_temperature: Option<f32>,
    environmental_humidity: Option<f32>,
}

fn build_client(timeout: Duration) -> Result<reqwest::Client, SourceError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

fn parse_url(url: &str) -> Result<Url, SourceError> {
    Url::parse(url).map_err(|e| SourceError::Decode(format!("invalid URL {url}: {e}")))
}

async fn get_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: Url,
) -> Result<T, SourceError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status(status.as_u16()));
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| SourceError::Decode(e.to_string()))
}

/// Reads samples from the probe bridge's `GET /getlatest?count=N`.
#[derive(Debug, Clone)]
pub struct HttpSampleSource {
    client: reqwest::Client,
    latest_url: Url,
}

impl HttpSampleSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let mut latest_url = parse_url(base_url)?;
        latest_url
            .path_segments_mut()
            .map_err(|_| SourceError::Decode(format!("URL {base_url} cannot be a base")))?
            .pop_if_empty()
            .push("getlatest");

        Ok(Self {
            client: build_client(timeout)?,
            latest_url,
        })
    }
}

#[async_trait]
impl SampleSource for HttpSampleSource {
    async fn fetch_window(&self, count: usize) -> Result<Vec<Sample>, SourceError> {
        let mut url = self.latest_url.clone();
        url.query_pairs_mut()
            .append_pair("count", &count.to_string());

        trace!(%url, "Fetching sample window");
        let samples: Vec<WireSample> = get_json(&self.client, url).await?;

        Ok(samples_from_wire(samples, count))
    }
}

/// Reads ambient conditions from an environment endpoint returning
/// `{"body": {"environmentalTemperature": .., "environmentalHumidity": ..}}`.
#[derive(Debug, Clone)]
pub struct HttpBaselineProvider {
    client: reqwest::Client,
    url: Url,
}

impl HttpBaselineProvider {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, SourceError> {
        Ok(Self {
            client: build_client(timeout)?,
            url: parse_url(url)?,
        })
    }
}

#[async_trait]
impl BaselineProvider for HttpBaselineProvider {
    async fn refresh_baseline(&self) -> Result<Baseline, SourceError> {
        trace!(url = %self.url, "Fetching ambient baseline");
        let response: WireEnvironmentResponse = get_json(&self.client, self.url.clone()).await?;

        baseline_from_wire(response)
    }
}

/// Keep at most `count` samples; the bridge may send more than asked for.
fn samples_from_wire(samples: Vec<WireSample>, count: usize) -> Vec<Sample> {
    samples.into_iter().take(count).map(Sample::from).collect()
}

/// A reading missing either value is a failed refresh, not a partial one.
fn baseline_from_wire(response: WireEnvironmentResponse) -> Result<Baseline, SourceError> {
    let baseline = Baseline {
        ambient_temperature: response.body.environmental_temperature,
        ambient_humidity: response.body.environmental_humidity,
    };
    if !baseline.is_set() {
        return Err(SourceError::Decode(
            "environment reading is missing temperature or humidity".into(),
        ));
    }

    Ok(baseline)
}
