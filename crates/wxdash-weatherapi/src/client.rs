//! HTTP client for the WeatherAPI.com REST API.
//!
//! Deliberately thin: one attempt per call, no retries, raw JSON out. Shape
//! interpretation belongs to [`crate::normalize`].

use std::time::Duration;

use reqwest::{Client, Url};
use wxdash_core::CoordinateKey;

use crate::error::ProviderError;

const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com/v1/";

/// Client for the WeatherAPI.com `search` and `forecast` endpoints.
///
/// Use [`WeatherApiClient::new`] for production or
/// [`WeatherApiClient::with_base_url`] to point at a mock server in tests.
#[derive(Clone)]
pub struct WeatherApiClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl std::fmt::Debug for WeatherApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiClient")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl WeatherApiClient {
    /// Creates a new client pointed at the production WeatherAPI host.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ProviderError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent("wxdash/0.1 (weather-dashboard)")
            .build()?;

        // A single trailing slash makes `Url::join` append the endpoint instead
        // of replacing the last path segment (`/v1` would otherwise be lost).
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ProviderError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Searches places by free text (`search.json?q=<query>`).
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Status`] if WeatherAPI answers with a non-2xx status.
    /// - [`ProviderError::Http`] on network failure or timeout.
    /// - [`ProviderError::Decode`] if the body is not JSON.
    pub async fn search(&self, query: &str) -> Result<serde_json::Value, ProviderError> {
        let url = self.build_url("search.json", &[("q", query)])?;
        self.request_json("search.json", url).await
    }

    /// Looks up places near a coordinate pair (`search.json?q=lat,lon`).
    ///
    /// # Errors
    ///
    /// Same as [`WeatherApiClient::search`].
    pub async fn search_by_coordinates(
        &self,
        coordinates: &CoordinateKey,
    ) -> Result<serde_json::Value, ProviderError> {
        let q = coordinates.key();
        let url = self.build_url("search.json", &[("q", &q)])?;
        self.request_json("search.json", url).await
    }

    /// Fetches current conditions plus a `days`-day hourly/daily forecast.
    ///
    /// # Errors
    ///
    /// Same as [`WeatherApiClient::search`].
    pub async fn forecast(
        &self,
        coordinates: &CoordinateKey,
        days: u8,
    ) -> Result<serde_json::Value, ProviderError> {
        let q = coordinates.key();
        let days = days.to_string();
        let url = self.build_url(
            "forecast.json",
            &[("q", &q), ("days", &days), ("aqi", "no"), ("alerts", "yes")],
        )?;
        self.request_json("forecast.json", url).await
    }

    /// Builds the endpoint URL with the API key first and all values
    /// percent-encoded.
    fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<Url, ProviderError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| ProviderError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request and parses the body as JSON.
    ///
    /// `endpoint` is used for logs and error context, and transport errors
    /// are stripped of their URL, so the API key in the query string never
    /// leaves this type.
    async fn request_json(
        &self,
        endpoint: &str,
        url: Url,
    ) -> Result<serde_json::Value, ProviderError> {
        tracing::debug!(endpoint, "calling WeatherAPI");
        // reqwest errors embed the request URL, which carries the API key.
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.without_url()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Http(e.without_url()))?;

        if !status.is_success() {
            let message = upstream_error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });
            tracing::warn!(endpoint, status = status.as_u16(), %message, "WeatherAPI request failed");
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|source| ProviderError::Decode {
            context: endpoint.to_owned(),
            source,
        })
    }
}

/// Extracts `error.message` from a WeatherAPI error body such as
/// `{"error":{"code":1006,"message":"No matching location found."}}`.
fn upstream_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
