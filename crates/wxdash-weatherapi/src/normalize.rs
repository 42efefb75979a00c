//! Normalization of WeatherAPI responses into `wxdash-core` types.
//!
//! Every unit conversion happens here, once: km/h → m/s, km → m and
//! percentage → fraction. Fields WeatherAPI does not supply (dew point,
//! moon phase, timezone offset) are set to `0` so the schema is always
//! complete.

use serde_json::Value;
use wxdash_core::{
    CoordinateKey, CurrentConditions, DailyFeelsLike, DailyPoint, DailyTemperature, GeoLocation,
    HourlyPoint, NormalizedForecast, WeatherCondition,
};

use crate::error::NormalizationError;
use crate::local_time::{hour_of_day, LocalZone};
use crate::types::{Condition, ForecastDay, ForecastResponse, Hour, SearchLocation};

/// Local hour sampled for a day's "night" values.
pub const NIGHT_HOUR: u32 = 23;
/// Local hour sampled for a day's "evening" values.
pub const EVENING_HOUR: u32 = 18;
/// Local hour sampled for a day's "morning" values.
pub const MORNING_HOUR: u32 = 6;
/// Local hour sampled for daily pressure, wind direction and cloud cover.
pub const MIDDAY_HOUR: u32 = 12;

/// Converts km/h to m/s.
#[must_use]
pub fn kph_to_mps(kph: f64) -> f64 {
    kph / 3.6
}

/// Converts kilometres to metres.
#[must_use]
pub fn km_to_m(km: f64) -> f64 {
    km * 1000.0
}

/// Converts a 0–100 percentage to a 0.0–1.0 fraction.
#[must_use]
pub fn percent_to_fraction(percent: f64) -> f64 {
    percent / 100.0
}

/// Converts a `search.json` payload into [`GeoLocation`]s.
///
/// A payload that is not an array at all means "no places" and yields an
/// empty list.
///
/// # Errors
///
/// Returns [`NormalizationError::Shape`] if an array element lacks a name or
/// numeric (or numeric-string) coordinates.
pub fn normalize_locations(raw: Value) -> Result<Vec<GeoLocation>, NormalizationError> {
    if !raw.is_array() {
        tracing::debug!("search payload is not an array; treating as no results");
        return Ok(Vec::new());
    }

    let places: Vec<SearchLocation> =
        serde_json::from_value(raw).map_err(|source| NormalizationError::Shape {
            context: "search",
            source,
        })?;

    Ok(places
        .into_iter()
        .map(|p| GeoLocation {
            name: p.name,
            latitude: p.lat,
            longitude: p.lon,
            country: p.country,
        })
        .collect())
}

/// Converts a `forecast.json` payload into a [`NormalizedForecast`] for the
/// requested coordinates.
///
/// # Errors
///
/// - [`NormalizationError::Shape`] if a required field is missing or has
///   the wrong type anywhere in the payload.
/// - [`NormalizationError::EmptyForecast`] if the response has no days.
pub fn normalize_forecast(
    raw: Value,
    coordinates: &CoordinateKey,
) -> Result<NormalizedForecast, NormalizationError> {
    let response: ForecastResponse =
        serde_json::from_value(raw).map_err(|source| NormalizationError::Shape {
            context: "forecast",
            source,
        })?;

    let days = &response.forecast.forecastday;
    let first_day = days.first().ok_or(NormalizationError::EmptyForecast)?;
    let zone = LocalZone::for_location(&response.location);

    let current = &response.current;
    let current = CurrentConditions {
        dt: current.last_updated_epoch,
        sunrise: zone.astro_timestamp(&first_day.date, &first_day.astro.sunrise),
        sunset: zone.astro_timestamp(&first_day.date, &first_day.astro.sunset),
        temp: current.temp_c,
        feels_like: current.feelslike_c,
        pressure: current.pressure_mb,
        humidity: current.humidity,
        dew_point: 0.0,
        uvi: current.uv,
        clouds: current.cloud,
        visibility: km_to_m(current.vis_km),
        wind_speed: kph_to_mps(current.wind_kph),
        wind_deg: current.wind_degree,
        weather: conditions(&current.condition),
    };

    let hourly = days
        .iter()
        .flat_map(|day| {
            let sunrise = zone.astro_timestamp(&day.date, &day.astro.sunrise);
            let sunset = zone.astro_timestamp(&day.date, &day.astro.sunset);
            day.hour
                .iter()
                .map(move |hour| normalize_hour(hour, sunrise, sunset))
        })
        .collect();

    let daily = days.iter().map(|day| normalize_day(day, zone)).collect();

    Ok(NormalizedForecast {
        lat: coordinates.latitude(),
        lon: coordinates.longitude(),
        timezone: response.location.tz_id,
        timezone_offset: 0,
        current,
        hourly,
        daily,
    })
}

fn normalize_hour(hour: &Hour, sunrise: i64, sunset: i64) -> HourlyPoint {
    HourlyPoint {
        dt: hour.time_epoch,
        sunrise,
        sunset,
        temp: hour.temp_c,
        feels_like: hour.feelslike_c,
        pressure: hour.pressure_mb,
        humidity: hour.humidity,
        dew_point: 0.0,
        uvi: hour.uv,
        clouds: hour.cloud,
        visibility: km_to_m(hour.vis_km),
        wind_speed: kph_to_mps(hour.wind_kph),
        wind_deg: hour.wind_degree,
        weather: conditions(&hour.condition),
        pop: percent_to_fraction(hour.chance_of_rain),
    }
}

fn normalize_day(day: &ForecastDay, zone: LocalZone) -> DailyPoint {
    let agg = &day.day;
    let night = sample_hour(&day.hour, NIGHT_HOUR);
    let evening = sample_hour(&day.hour, EVENING_HOUR);
    let morning = sample_hour(&day.hour, MORNING_HOUR);
    let midday = sample_hour(&day.hour, MIDDAY_HOUR);

    // Without hourly detail the daily average stands in for every slot.
    let temp_at = |h: Option<&Hour>| h.map_or(agg.avgtemp_c, |h| h.temp_c);
    let feels_at = |h: Option<&Hour>| h.map_or(agg.avgtemp_c, |h| h.feelslike_c);

    DailyPoint {
        dt: day.date_epoch,
        sunrise: zone.astro_timestamp(&day.date, &day.astro.sunrise),
        sunset: zone.astro_timestamp(&day.date, &day.astro.sunset),
        moonrise: zone.astro_timestamp(&day.date, &day.astro.moonrise),
        moonset: zone.astro_timestamp(&day.date, &day.astro.moonset),
        moon_phase: 0.0,
        temp: DailyTemperature {
            day: agg.avgtemp_c,
            min: agg.mintemp_c,
            max: agg.maxtemp_c,
            night: temp_at(night),
            eve: temp_at(evening),
            morn: temp_at(morning),
        },
        feels_like: DailyFeelsLike {
            day: agg.avgtemp_c,
            night: feels_at(night),
            eve: feels_at(evening),
            morn: feels_at(morning),
        },
        pressure: midday.map_or(0.0, |h| h.pressure_mb),
        humidity: percentage(agg.avghumidity),
        dew_point: 0.0,
        wind_speed: kph_to_mps(agg.maxwind_kph),
        wind_deg: midday.map_or(0, |h| h.wind_degree),
        weather: conditions(&agg.condition),
        clouds: midday.map_or(0, |h| h.cloud),
        pop: percent_to_fraction(agg.daily_chance_of_rain),
        rain: agg.totalprecip_mm,
        uvi: agg.uv,
    }
}

/// Picks the hour whose local hour-of-day is `slot`, or the nearest one
/// available (ties go to the earlier hour).
///
/// Hour-of-day is read from the entry's local `time`; an unparseable time
/// falls back to the entry's position in the day. For a complete 24-hour day
/// this is plain index sampling; a short final day clamps to what exists.
fn sample_hour(hours: &[Hour], slot: u32) -> Option<&Hour> {
    hours
        .iter()
        .enumerate()
        .map(|(idx, hour)| {
            let position = u32::try_from(idx).unwrap_or(u32::MAX);
            (hour_of_day(&hour.time).unwrap_or(position), hour)
        })
        .min_by_key(|(hod, _)| (hod.abs_diff(slot), *hod))
        .map(|(_, hour)| hour)
}

fn conditions(condition: &Condition) -> Vec<WeatherCondition> {
    vec![WeatherCondition {
        id: condition.code,
        main: condition.text.clone(),
        description: condition.text.clone(),
        icon: condition.icon.clone(),
    }]
}

/// Rounds a percentage-valued aggregate to a whole number in 0..=100.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=100 first
fn percentage(value: f64) -> u32 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u32
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
