//! Forecast cache and search log.
//!
//! [`WeatherStore`] is the storage seam: [`MemStore`] keeps everything in
//! process memory, and a durable backend can implement the same trait. The
//! store never expires anything; callers judge freshness with
//! [`CacheEntry::is_fresh`].

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use thiserror::Error;
use wxdash_core::NormalizedForecast;

use crate::clock::Clock;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store lock poisoned during {0}")]
    Poisoned(&'static str),
}

/// A cached forecast for one canonical coordinate key.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub key: String,
    pub payload: NormalizedForecast,
    pub created_at: DateTime<Utc>,
}

impl CacheEntry {
    /// `true` while the entry is younger than `window` at `now`.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>, window: TimeDelta) -> bool {
        now - self.created_at < window
    }
}

/// One successful forward-geocoding query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRecord {
    pub id: u64,
    pub query: String,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait WeatherStore: Send + Sync {
    /// Exact-match lookup on the canonical coordinate key.
    async fn get_weather_cache(&self, key: &str) -> Result<Option<CacheEntry>, StoreError>;

    /// Stores `payload` under `key`, replacing any previous entry wholesale.
    async fn add_weather_cache(
        &self,
        key: &str,
        payload: NormalizedForecast,
    ) -> Result<CacheEntry, StoreError>;

    async fn add_search_history(&self, query: &str) -> Result<SearchRecord, StoreError>;

    /// All search records in insertion order.
    async fn get_search_history(&self) -> Result<Vec<SearchRecord>, StoreError>;
}

/// In-memory [`WeatherStore`]. Lives for the lifetime of the process.
pub struct MemStore {
    clock: Arc<dyn Clock>,
    forecasts: RwLock<HashMap<String, CacheEntry>>,
    searches: RwLock<Vec<SearchRecord>>,
}

impl MemStore {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            forecasts: RwLock::new(HashMap::new()),
            searches: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl WeatherStore for MemStore {
    async fn get_weather_cache(&self, key: &str) -> Result<Option<CacheEntry>, StoreError> {
        let forecasts = self
            .forecasts
            .read()
            .map_err(|_| StoreError::Poisoned("get_weather_cache"))?;
        Ok(forecasts.get(key).cloned())
    }

    async fn add_weather_cache(
        &self,
        key: &str,
        payload: NormalizedForecast,
    ) -> Result<CacheEntry, StoreError> {
        let entry = CacheEntry {
            key: key.to_owned(),
            payload,
            created_at: self.clock.now(),
        };
        self.forecasts
            .write()
            .map_err(|_| StoreError::Poisoned("add_weather_cache"))?
            .insert(entry.key.clone(), entry.clone());
        Ok(entry)
    }

    async fn add_search_history(&self, query: &str) -> Result<SearchRecord, StoreError> {
        let mut searches = self
            .searches
            .write()
            .map_err(|_| StoreError::Poisoned("add_search_history"))?;
        let record = SearchRecord {
            id: searches.len() as u64 + 1,
            query: query.to_owned(),
            created_at: self.clock.now(),
        };
        searches.push(record.clone());
        Ok(record)
    }

    async fn get_search_history(&self) -> Result<Vec<SearchRecord>, StoreError> {
        let searches = self
            .searches
            .read()
            .map_err(|_| StoreError::Poisoned("get_search_history"))?;
        Ok(searches.clone())
    }
}
