//! Provider payloads and wiring shared by the server's unit tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use wiremock::MockServer;
use wxdash_weatherapi::WeatherApiClient;

use crate::clock::ManualClock;
use crate::service::{ServiceSettings, WeatherService};
use crate::store::{MemStore, WeatherStore};

/// 2025-05-09 00:00 UTC.
pub const DAY_ONE_EPOCH: i64 = 1_746_748_800;

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 9, 14, 0, 0).unwrap()
}

fn condition(code: i64) -> Value {
    json!({ "text": "Clear", "icon": "//cdn.weatherapi.com/weather/64x64/day/113.png", "code": code })
}

fn hour(date: &str, date_epoch: i64, h: i64) -> Value {
    json!({
        "time_epoch": date_epoch + h * 3600,
        "time": format!("{date} {h:02}:00"),
        "temp_c": 10.0 + h as f64,
        "feelslike_c": 9.0 + h as f64,
        "pressure_mb": 1012.0,
        "humidity": 55,
        "uv": 4.0,
        "cloud": 0,
        "vis_km": 10.0,
        "wind_kph": 7.2,
        "wind_degree": 180,
        "chance_of_rain": 0,
        "condition": condition(800)
    })
}

fn day(date: &str, date_epoch: i64, hours: i64) -> Value {
    json!({
        "date": date,
        "date_epoch": date_epoch,
        "day": {
            "maxtemp_c": 24.0,
            "mintemp_c": 10.0,
            "avgtemp_c": 17.0,
            "maxwind_kph": 18.0,
            "totalprecip_mm": 0.0,
            "avghumidity": 55,
            "daily_chance_of_rain": 0,
            "uv": 6.0,
            "condition": condition(800)
        },
        "astro": {
            "sunrise": "05:47 AM",
            "sunset": "08:02 PM",
            "moonrise": "11:10 PM",
            "moonset": "No moonset"
        },
        "hour": (0..hours).map(|h| hour(date, date_epoch, h)).collect::<Vec<_>>()
    })
}

/// A two-day clear-sky forecast for New York: a full first day and a
/// five-hour second day.
pub fn clear_forecast() -> Value {
    json!({
        "location": {
            "name": "New York",
            "tz_id": "America/New_York",
            "localtime_epoch": DAY_ONE_EPOCH + 14 * 3600,
            "localtime": "2025-05-09 10:00"
        },
        "current": {
            "last_updated_epoch": DAY_ONE_EPOCH + 13 * 3600,
            "temp_c": 20.0,
            "feelslike_c": 19.5,
            "pressure_mb": 1013.0,
            "humidity": 48,
            "uv": 5.0,
            "cloud": 0,
            "vis_km": 16.0,
            "wind_kph": 10.8,
            "wind_degree": 200,
            "condition": condition(800)
        },
        "forecast": {
            "forecastday": [
                day("2025-05-09", DAY_ONE_EPOCH, 24),
                day("2025-05-10", DAY_ONE_EPOCH + 86_400, 5)
            ]
        }
    })
}

pub fn london_search() -> Value {
    json!([
        { "id": 2_801_268, "name": "London", "region": "City of London, Greater London",
          "country": "United Kingdom", "lat": 51.52, "lon": -0.11 }
    ])
}

pub fn client_for(server: &MockServer) -> WeatherApiClient {
    WeatherApiClient::with_base_url("test-key", 5, &format!("{}/v1", server.uri()))
        .expect("client construction")
}

/// A service backed by `store`, with a manual clock parked at [`start`].
pub fn service_with_store(
    server: &MockServer,
    store: Arc<dyn WeatherStore>,
    clock: Arc<ManualClock>,
) -> WeatherService {
    WeatherService::new(
        client_for(server),
        store,
        clock,
        ServiceSettings::default(),
    )
}

/// A service over a fresh [`MemStore`]; the returned clock drives both.
pub fn service(server: &MockServer) -> (WeatherService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(start()));
    let store = Arc::new(MemStore::new(clock.clone()));
    (service_with_store(server, store, clock.clone()), clock)
}
