//! Classifies whether a wearable temperature/humidity/motion probe is inside
//! a mouth, from a short rolling window of samples and an ambient baseline.

pub mod api;
pub mod api_client;
pub mod classify;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod source;
pub mod tracing;
pub mod types;
