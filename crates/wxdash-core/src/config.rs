use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_WEATHER_API_BASE_URL: &str = "http://api.weatherapi.com/v1";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let weather_api_key = require("WEATHER_API_KEY")?;

    let env = parse_environment(&or_default("WXDASH_ENV", "development"));
    let bind_addr = parse_addr("WXDASH_BIND_ADDR", "0.0.0.0:5000")?;
    let log_level = or_default("WXDASH_LOG_LEVEL", "info");
    let weather_api_base_url =
        or_default("WXDASH_WEATHER_API_BASE_URL", DEFAULT_WEATHER_API_BASE_URL);
    let provider_timeout_secs = parse_u64("WXDASH_PROVIDER_TIMEOUT_SECS", "10")?;
    let forecast_days = parse_forecast_days(&or_default("WXDASH_FORECAST_DAYS", "7"))?;
    let cache_freshness_secs = parse_u64("WXDASH_CACHE_FRESHNESS_SECS", "1800")?;

    if provider_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "WXDASH_PROVIDER_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        weather_api_key,
        weather_api_base_url,
        provider_timeout_secs,
        forecast_days,
        cache_freshness_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

/// WeatherAPI serves at most 14 forecast days.
fn parse_forecast_days(raw: &str) -> Result<u8, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "WXDASH_FORECAST_DAYS".to_string(),
        reason,
    };
    let days = raw.parse::<u8>().map_err(|e| invalid(e.to_string()))?;
    if (1..=14).contains(&days) {
        Ok(days)
    } else {
        Err(invalid(format!("{days} is outside 1..=14")))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
