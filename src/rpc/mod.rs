//! Seed acquisition over HTTP.
//!
//! The client half posts the shared key to the seed-granting endpoint and
//! decodes the returned 64-bit seed; the server half lives in [`server`].

pub mod server;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::MixError;

/// Default seed endpoint URL.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/random";

/// Default shared API key.
pub const DEFAULT_API_KEY: &str = "RANDOM_NUM";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Seed endpoint client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedApiConfig {
    /// Seed endpoint URL
    pub url: String,
    /// Shared secret presented to the endpoint
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SeedApiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Request body carrying the shared key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedRequest {
    pub key: String,
}

/// Response body carrying the granted seed as a plain decimal integer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedResponse {
    pub random_value: u64,
}

/// HTTP client for the seed-granting endpoint.
pub struct SeedClient {
    config: SeedApiConfig,
    http_client: reqwest::Client,
}

impl SeedClient {
    /// Create a client with default configuration.
    pub fn new() -> Self {
        Self::with_config(SeedApiConfig::default())
    }

    /// Create a client with custom configuration.
    pub fn with_config(config: SeedApiConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Get the current configuration
    pub fn config(&self) -> &SeedApiConfig {
        &self.config
    }

    /// Fetch a fresh 64-bit seed from the endpoint.
    ///
    /// A 403 maps to [`MixError::Authentication`]; any other network,
    /// timeout, or protocol failure maps to [`MixError::SeedFetch`].
    /// Nothing is retried here; the caller may.
    pub async fn fetch_seed(&self) -> Result<u64, MixError> {
        let request = SeedRequest {
            key: self.config.api_key.clone(),
        };

        let resp = self
            .http_client
            .post(&self.config.url)
            .json(&request)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .send()
            .await
            .map_err(|e| MixError::SeedFetch(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::FORBIDDEN {
            return Err(MixError::Authentication);
        }
        if !resp.status().is_success() {
            return Err(MixError::SeedFetch(format!(
                "seed endpoint returned {}",
                resp.status()
            )));
        }

        let body: SeedResponse = resp
            .json()
            .await
            .map_err(|e| MixError::SeedFetch(e.to_string()))?;

        Ok(body.random_value)
    }
}

impl Default for SeedClient {
    fn default() -> Self {
        Self::new()
    }
}
