//! Request orchestration: validation, cache lookup, provider fetch,
//! normalization and write-through.

use std::sync::Arc;

use chrono::TimeDelta;
use thiserror::Error;
use wxdash_core::{AppConfig, CoordinateError, CoordinateKey, GeoLocation, NormalizedForecast};
use wxdash_weatherapi::{
    normalize_forecast, normalize_locations, NormalizationError, ProviderError, WeatherApiClient,
};

use crate::clock::Clock;
use crate::store::{SearchRecord, StoreError, WeatherStore};

pub const MISSING_QUERY_MESSAGE: &str = "Query parameter 'q' is required";

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Bad request parameters. Raised before any provider call.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Normalization(#[from] NormalizationError),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl From<CoordinateError> for ServiceError {
    fn from(err: CoordinateError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ServiceSettings {
    /// Cached forecasts younger than this are served without a provider call.
    pub freshness: TimeDelta,
    pub forecast_days: u8,
}

impl ServiceSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let secs = i64::try_from(config.cache_freshness_secs).unwrap_or(i64::MAX);
        Self {
            freshness: TimeDelta::try_seconds(secs).unwrap_or(TimeDelta::MAX),
            forecast_days: config.forecast_days,
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            freshness: TimeDelta::minutes(30),
            forecast_days: 7,
        }
    }
}

pub struct WeatherService {
    client: WeatherApiClient,
    store: Arc<dyn WeatherStore>,
    clock: Arc<dyn Clock>,
    settings: ServiceSettings,
}

impl WeatherService {
    #[must_use]
    pub fn new(
        client: WeatherApiClient,
        store: Arc<dyn WeatherStore>,
        clock: Arc<dyn Clock>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            client,
            store,
            clock,
            settings,
        }
    }

    /// Returns the normalized forecast for `lat`/`lon`, from cache when fresh.
    ///
    /// A failed cache read counts as a miss and a failed cache write is only
    /// logged; neither fails the request. Nothing is cached when the provider
    /// call or normalization fails.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Validation`] for missing or invalid coordinates.
    /// - [`ServiceError::Provider`] / [`ServiceError::Normalization`] when a
    ///   fresh forecast cannot be produced.
    pub async fn forecast(
        &self,
        lat: Option<&str>,
        lon: Option<&str>,
    ) -> Result<NormalizedForecast, ServiceError> {
        let coordinates = CoordinateKey::from_params(lat, lon)?;
        let key = coordinates.key();

        match self.store.get_weather_cache(&key).await {
            Ok(Some(entry)) if entry.is_fresh(self.clock.now(), self.settings.freshness) => {
                tracing::debug!(%key, created_at = %entry.created_at, "forecast cache hit");
                return Ok(entry.payload);
            }
            Ok(Some(entry)) => {
                tracing::debug!(%key, created_at = %entry.created_at, "forecast cache stale");
            }
            Ok(None) => tracing::debug!(%key, "forecast cache miss"),
            Err(e) => {
                tracing::warn!(%key, error = %e, "forecast cache read failed; fetching upstream");
            }
        }

        let raw = self
            .client
            .forecast(&coordinates, self.settings.forecast_days)
            .await?;
        let forecast = normalize_forecast(raw, &coordinates)?;

        if let Err(e) = self.store.add_weather_cache(&key, forecast.clone()).await {
            tracing::warn!(%key, error = %e, "forecast cache write failed");
        }

        Ok(forecast)
    }

    /// Forward geocoding. Queries that return at least one place are
    /// appended to the search history.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Validation`] for a missing or blank query, otherwise
    /// provider and normalization failures.
    pub async fn geocode(&self, query: Option<&str>) -> Result<Vec<GeoLocation>, ServiceError> {
        let query = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| ServiceError::Validation(MISSING_QUERY_MESSAGE.to_string()))?;

        let raw = self.client.search(query).await?;
        let locations = normalize_locations(raw)?;
        tracing::debug!(query, results = locations.len(), "geocoding search complete");

        if !locations.is_empty() {
            if let Err(e) = self.store.add_search_history(query).await {
                tracing::warn!(query, error = %e, "failed to record search history");
            }
        }

        Ok(locations)
    }

    /// Places near `lat`/`lon`. Never cached and never recorded.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Validation`] for missing or invalid coordinates,
    /// otherwise provider and normalization failures.
    pub async fn reverse_geocode(
        &self,
        lat: Option<&str>,
        lon: Option<&str>,
    ) -> Result<Vec<GeoLocation>, ServiceError> {
        let coordinates = CoordinateKey::from_params(lat, lon)?;
        let raw = self.client.search_by_coordinates(&coordinates).await?;
        Ok(normalize_locations(raw)?)
    }

    /// # Errors
    ///
    /// [`ServiceError::Storage`] if the store cannot be read.
    pub async fn search_history(&self) -> Result<Vec<SearchRecord>, ServiceError> {
        Ok(self.store.get_search_history().await?)
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
