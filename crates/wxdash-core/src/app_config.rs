use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub weather_api_key: String,
    pub weather_api_base_url: String,
    pub provider_timeout_secs: u64,
    /// Number of forecast days requested from the provider (1–14).
    pub forecast_days: u8,
    /// Maximum age of a cached forecast before it is refetched.
    pub cache_freshness_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("weather_api_key", &"[redacted]")
            .field("weather_api_base_url", &self.weather_api_base_url)
            .field("provider_timeout_secs", &self.provider_timeout_secs)
            .field("forecast_days", &self.forecast_days)
            .field("cache_freshness_secs", &self.cache_freshness_secs)
            .finish()
    }
}
