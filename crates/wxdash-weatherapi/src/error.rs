use thiserror::Error;

/// Errors returned by [`crate::WeatherApiClient`].
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// WeatherAPI answered with a non-2xx status.
    ///
    /// `message` is the upstream `error.message` when the body carries one,
    /// otherwise the HTTP reason phrase.
    #[error("WeatherAPI error: {message}")]
    Status { status: u16, message: String },

    /// A 2xx response body was not valid JSON.
    #[error("JSON decoding error for {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// A successful provider response did not have the expected shape.
#[derive(Debug, Error)]
pub enum NormalizationError {
    #[error("unexpected {context} response shape: {source}")]
    Shape {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("forecast response contains no forecast days")]
    EmptyForecast,
}
