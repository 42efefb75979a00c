//! Validated coordinate pair used as the forecast cache key.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("Parameters 'lat' and 'lon' are required")]
    Missing,

    #[error("invalid {field} '{raw}': expected a decimal number")]
    NotANumber { field: &'static str, raw: String },

    #[error("{field} {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// A latitude/longitude pair parsed from request parameters.
///
/// The canonical [`key`](Self::key) is built from the trimmed input strings
/// rather than from the parsed floats, so the same request always maps to the
/// same key regardless of float formatting. Coordinates written differently
/// (`40.70` vs `40.7`) are distinct keys.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateKey {
    lat_raw: String,
    lon_raw: String,
    latitude: f64,
    longitude: f64,
}

impl CoordinateKey {
    /// Builds a key from optional query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::Missing`] if either parameter is absent or
    /// blank, [`CoordinateError::NotANumber`] if it does not parse, and
    /// [`CoordinateError::OutOfRange`] if it falls outside valid degrees.
    pub fn from_params(lat: Option<&str>, lon: Option<&str>) -> Result<Self, CoordinateError> {
        let lat = lat.map(str::trim).filter(|s| !s.is_empty());
        let lon = lon.map(str::trim).filter(|s| !s.is_empty());
        let (Some(lat), Some(lon)) = (lat, lon) else {
            return Err(CoordinateError::Missing);
        };

        let latitude = parse_degrees("lat", lat, 90.0)?;
        let longitude = parse_degrees("lon", lon, 180.0)?;

        Ok(Self {
            lat_raw: lat.to_owned(),
            lon_raw: lon.to_owned(),
            latitude,
            longitude,
        })
    }

    /// Canonical `"lat,lon"` encoding. Also the provider's `q` value.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{},{}", self.lat_raw, self.lon_raw)
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl std::fmt::Display for CoordinateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat_raw, self.lon_raw)
    }
}

fn parse_degrees(field: &'static str, raw: &str, limit: f64) -> Result<f64, CoordinateError> {
    let value = raw
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CoordinateError::NotANumber {
            field,
            raw: raw.to_owned(),
        })?;

    if !(-limit..=limit).contains(&value) {
        return Err(CoordinateError::OutOfRange {
            field,
            value,
            min: -limit,
            max: limit,
        });
    }
    Ok(value)
}
