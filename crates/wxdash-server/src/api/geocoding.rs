use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use wxdash_core::GeoLocation;

use crate::middleware::RequestId;

use super::{map_service_error, query_params, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CoordinateQuery {
    lat: Option<String>,
    lon: Option<String>,
}

pub(super) async fn search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<GeoLocation>>, ApiError> {
    let params = query_params(&req_id.0, query)?;
    state
        .service
        .geocode(params.q.as_deref())
        .await
        .map(Json)
        .map_err(|e| map_service_error(&req_id.0, &e))
}

pub(super) async fn reverse(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<CoordinateQuery>, QueryRejection>,
) -> Result<Json<Vec<GeoLocation>>, ApiError> {
    let params = query_params(&req_id.0, query)?;
    state
        .service
        .reverse_geocode(params.lat.as_deref(), params.lon.as_deref())
        .await
        .map(Json)
        .map_err(|e| map_service_error(&req_id.0, &e))
}
