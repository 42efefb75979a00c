//! Client and normalizer for the WeatherAPI.com REST API.
//!
//! Everything that knows WeatherAPI field names lives in this crate; callers
//! only ever see raw JSON from [`WeatherApiClient`] and the provider-neutral
//! types from `wxdash-core` produced by [`normalize`].

pub mod client;
pub mod error;
mod local_time;
pub mod normalize;
pub mod types;

pub use client::WeatherApiClient;
pub use error::{NormalizationError, ProviderError};
pub use normalize::{normalize_forecast, normalize_locations};
