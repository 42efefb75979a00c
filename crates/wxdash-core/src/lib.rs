pub mod app_config;
pub mod config;
pub mod coordinate;
pub mod forecast;
pub mod location;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use coordinate::{CoordinateError, CoordinateKey};
pub use forecast::{
    CurrentConditions, DailyFeelsLike, DailyPoint, DailyTemperature, HourlyPoint,
    NormalizedForecast, WeatherCondition,
};
pub use location::GeoLocation;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
