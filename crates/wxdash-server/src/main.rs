mod api;
mod clock;
mod middleware;
mod service;
mod store;
#[cfg(test)]
mod test_fixtures;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use wxdash_weatherapi::WeatherApiClient;

use crate::{
    api::{build_app, AppState},
    clock::SystemClock,
    service::{ServiceSettings, WeatherService},
    store::MemStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = wxdash_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let client = WeatherApiClient::with_base_url(
        &config.weather_api_key,
        config.provider_timeout_secs,
        &config.weather_api_base_url,
    )?;
    let clock = Arc::new(SystemClock);
    let store = Arc::new(MemStore::new(clock.clone()));
    let service = WeatherService::new(
        client,
        store,
        clock,
        ServiceSettings::from_config(&config),
    );
    let app = build_app(AppState {
        service: Arc::new(service),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        env = %config.env,
        addr = %config.bind_addr,
        forecast_days = config.forecast_days,
        cache_freshness_secs = config.cache_freshness_secs,
        "wxdash-server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
