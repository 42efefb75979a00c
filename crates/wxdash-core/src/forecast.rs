use serde::{Deserialize, Serialize};

/// Provider-independent forecast served to dashboard clients.
///
/// Field names follow the widely used "one call" layout so existing
/// front-ends can consume it unchanged. All timestamps are Unix epoch
/// seconds; wind is m/s, visibility is metres, `pop` is a 0.0–1.0 fraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedForecast {
    pub lat: f64,
    pub lon: f64,
    /// IANA zone id of the forecast location, e.g. `"America/New_York"`.
    pub timezone: String,
    /// Always `0`; the provider does not report a numeric offset.
    pub timezone_offset: i64,
    pub current: CurrentConditions,
    /// Every forecast hour of every day, in chronological order.
    pub hourly: Vec<HourlyPoint>,
    pub daily: Vec<DailyPoint>,
}

/// Weather condition attached to every point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherCondition {
    /// Provider condition code (e.g. `1000` for clear).
    pub id: i64,
    /// Short label.
    pub main: String,
    pub description: String,
    /// Icon reference as supplied by the provider.
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub dt: i64,
    pub sunrise: i64,
    pub sunset: i64,
    pub temp: f64,
    pub feels_like: f64,
    pub pressure: f64,
    pub humidity: u32,
    pub dew_point: f64,
    pub uvi: f64,
    pub clouds: u32,
    pub visibility: f64,
    pub wind_speed: f64,
    pub wind_deg: u32,
    pub weather: Vec<WeatherCondition>,
}

/// One forecast hour. Sunrise and sunset are those of the day the hour
/// belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPoint {
    pub dt: i64,
    pub sunrise: i64,
    pub sunset: i64,
    pub temp: f64,
    pub feels_like: f64,
    pub pressure: f64,
    pub humidity: u32,
    pub dew_point: f64,
    pub uvi: f64,
    pub clouds: u32,
    pub visibility: f64,
    pub wind_speed: f64,
    pub wind_deg: u32,
    pub weather: Vec<WeatherCondition>,
    /// Probability of precipitation, 0.0–1.0.
    pub pop: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTemperature {
    pub day: f64,
    pub min: f64,
    pub max: f64,
    pub night: f64,
    pub eve: f64,
    pub morn: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyFeelsLike {
    pub day: f64,
    pub night: f64,
    pub eve: f64,
    pub morn: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub dt: i64,
    pub sunrise: i64,
    pub sunset: i64,
    /// `0` when the moon does not rise on this day.
    pub moonrise: i64,
    /// `0` when the moon does not set on this day.
    pub moonset: i64,
    /// Always `0`; not supplied by the provider.
    pub moon_phase: f64,
    pub temp: DailyTemperature,
    pub feels_like: DailyFeelsLike,
    pub pressure: f64,
    pub humidity: u32,
    pub dew_point: f64,
    pub wind_speed: f64,
    pub wind_deg: u32,
    pub weather: Vec<WeatherCondition>,
    pub clouds: u32,
    pub pop: f64,
    /// Total precipitation in millimetres.
    pub rain: f64,
    pub uvi: f64,
}
