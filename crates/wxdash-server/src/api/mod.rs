mod geocoding;
mod history;
mod weather;

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query},
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, REQUEST_ID_HEADER};
use crate::service::{ServiceError, WeatherService};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<WeatherService>,
}

/// An error response. Serialized as `{"message": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (
            self.status,
            Json(ErrorBody {
                message: &self.message,
            }),
        )
            .into_response()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

/// Unwraps query parameters, rendering a malformed query string as a JSON
/// `{message}` error instead of axum's plain-text rejection.
pub(super) fn query_params<T>(
    request_id: &str,
    query: Result<Query<T>, QueryRejection>,
) -> Result<T, ApiError> {
    match query {
        Ok(Query(params)) => Ok(params),
        Err(rejection) => {
            tracing::debug!(request_id, error = %rejection.body_text(), "rejected query string");
            Err(ApiError::from(rejection))
        }
    }
}

/// Maps the service taxonomy onto HTTP: validation failures are the
/// client's fault, everything else is a 500 carrying the error text.
pub(super) fn map_service_error(request_id: &str, error: &ServiceError) -> ApiError {
    match error {
        ServiceError::Validation(message) => {
            tracing::debug!(request_id, %message, "rejected request");
            ApiError::new(StatusCode::BAD_REQUEST, message.clone())
        }
        ServiceError::Provider(_) | ServiceError::Normalization(_) | ServiceError::Storage(_) => {
            tracing::error!(request_id, error = %error, "request failed");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/geocoding", get(geocoding::search))
        .route("/api/reverse-geocoding", get(geocoding::reverse))
        .route("/api/weather", get(weather::forecast))
        .route("/api/search-history", get(history::list))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}
