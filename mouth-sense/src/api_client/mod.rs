//! HTTP client for the mouth-sense API.

pub mod types;

use anyhow::{Result, anyhow};
use serde::de::DeserializeOwned;

use types::{Classification, ClassificationRequest, ErrorResponse, SessionSnapshot};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:7786";

pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn health(&self) -> Result<String> {
        let response = self.http.get(self.url("/health")).send().await?;
        Ok(check(response).await?.text().await?)
    }

    /// Run one classification, optionally refreshing the ambient baseline.
    pub async fn classify(&self, update_environment: bool) -> Result<Classification> {
        let response = self
            .http
            .post(self.url("/classification"))
            .json(&ClassificationRequest { update_environment })
            .send()
            .await?;
        json(response).await
    }

    pub async fn session(&self) -> Result<SessionSnapshot> {
        let response = self.http.get(self.url("/session")).send().await?;
        json(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v0{}", self.base_url, path)
    }
}

/// Turn a non-2xx response into an error carrying the server's message.
async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match response.json::<ErrorResponse>().await {
        Ok(body) => Err(anyhow!("{status}: {}", body.error)),
        Err(_) => Err(anyhow!("{status}")),
    }
}

async fn json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    Ok(check(response).await?.json().await?)
}
