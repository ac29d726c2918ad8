//! Daemon configuration.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, Result};

const DEFAULT_SOURCE_URL: &str = "http://localhost:8080";
const DEFAULT_BASELINE_URL: &str = "http://localhost:8080/environment";
const DEFAULT_API_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 7786);
const DEFAULT_FETCH_TIMEOUT_MS: u64 = 2000;
const DEFAULT_LIVENESS_THRESHOLD: u32 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct DaemonConfig {
    /// Base URL of the probe bridge serving `/getlatest`.
    pub source_url: String,

    /// Endpoint returning ambient temperature and humidity.
    pub baseline_url: String,

    /// Address the HTTP API listens on.
    pub api_addr: SocketAddr,

    /// Per-request timeout for both feeds.
    pub fetch_timeout: Duration,

    /// Consecutive failed window fetches before the probe is reported as
    /// not responding.
    pub liveness_threshold: u32,
}

impl DaemonConfig {
    /// Read configuration from `MOUTH_SENSE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            source_url: url(&lookup, "MOUTH_SENSE_SOURCE_URL", DEFAULT_SOURCE_URL)?,
            baseline_url: url(&lookup, "MOUTH_SENSE_BASELINE_URL", DEFAULT_BASELINE_URL)?,
            api_addr: setting(
                &lookup,
                "MOUTH_SENSE_API_ADDR",
                SocketAddr::from(DEFAULT_API_ADDR),
            )?,
            fetch_timeout: Duration::from_millis(setting(
                &lookup,
                "MOUTH_SENSE_FETCH_TIMEOUT_MS",
                DEFAULT_FETCH_TIMEOUT_MS,
            )?),
            liveness_threshold: setting(
                &lookup,
                "MOUTH_SENSE_LIVENESS_THRESHOLD",
                DEFAULT_LIVENESS_THRESHOLD,
            )?,
        })
    }
}

/// Parse `name` if set, otherwise fall back to `default`.
fn setting<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("{name}={value:?}: {e}"))),
        None => Ok(default),
    }
}

fn url(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: &str) -> Result<String> {
    let value = lookup(name).unwrap_or_else(|| default.to_string());
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} is empty")));
    }
    Ok(value.trim().to_string())
}
