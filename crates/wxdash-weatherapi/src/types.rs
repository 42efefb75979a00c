//! WeatherAPI.com response types.
//!
//! Only the fields the normalizer reads are modelled; serde ignores the rest.
//! Units are the provider's: Celsius, km/h, km, millibars, percentages.

use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// search.json
// ---------------------------------------------------------------------------

/// One place from `search.json`. Forward searches return numeric
/// coordinates; coordinate lookups have been seen returning strings, so
/// both are accepted.
#[derive(Debug, Deserialize)]
pub struct SearchLocation {
    pub name: String,
    #[serde(deserialize_with = "number_or_string")]
    pub lat: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub lon: f64,
    #[serde(default)]
    pub country: String,
}

// ---------------------------------------------------------------------------
// forecast.json
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub location: ForecastLocation,
    pub current: Current,
    pub forecast: Forecast,
}

#[derive(Debug, Deserialize)]
pub struct ForecastLocation {
    /// IANA zone id, e.g. `"America/New_York"`.
    pub tz_id: String,
    #[serde(default)]
    pub localtime_epoch: Option<i64>,
    /// Local wall-clock time, `"YYYY-MM-DD H:MM"`.
    #[serde(default)]
    pub localtime: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Condition {
    pub text: String,
    pub icon: String,
    pub code: i64,
}

#[derive(Debug, Deserialize)]
pub struct Current {
    pub last_updated_epoch: i64,
    pub temp_c: f64,
    pub feelslike_c: f64,
    pub pressure_mb: f64,
    pub humidity: u32,
    pub uv: f64,
    pub cloud: u32,
    pub vis_km: f64,
    pub wind_kph: f64,
    pub wind_degree: u32,
    pub condition: Condition,
}

#[derive(Debug, Deserialize)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastDay {
    /// Local date, `"YYYY-MM-DD"`.
    pub date: String,
    pub date_epoch: i64,
    pub day: DayAggregate,
    pub astro: Astro,
    /// Normally 24 entries; the last day of a window may be short.
    #[serde(default)]
    pub hour: Vec<Hour>,
}

#[derive(Debug, Deserialize)]
pub struct DayAggregate {
    pub maxtemp_c: f64,
    pub mintemp_c: f64,
    pub avgtemp_c: f64,
    pub maxwind_kph: f64,
    pub totalprecip_mm: f64,
    /// Integer on the wire, but older responses carry `77.0`.
    pub avghumidity: f64,
    pub daily_chance_of_rain: f64,
    pub uv: f64,
    pub condition: Condition,
}

/// Local wall-clock times such as `"05:47 AM"`. The moon fields may read
/// `"No moonrise"` / `"No moonset"`.
#[derive(Debug, Deserialize)]
pub struct Astro {
    pub sunrise: String,
    pub sunset: String,
    #[serde(default)]
    pub moonrise: String,
    #[serde(default)]
    pub moonset: String,
}

#[derive(Debug, Deserialize)]
pub struct Hour {
    pub time_epoch: i64,
    /// Local wall-clock time, `"YYYY-MM-DD HH:MM"`.
    pub time: String,
    pub temp_c: f64,
    pub feelslike_c: f64,
    pub pressure_mb: f64,
    pub humidity: u32,
    pub uv: f64,
    pub cloud: u32,
    pub vis_km: f64,
    pub wind_kph: f64,
    pub wind_degree: u32,
    pub chance_of_rain: f64,
    pub condition: Condition,
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid coordinate '{s}': {e}"))),
    }
}
