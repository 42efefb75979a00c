use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use wxdash_core::NormalizedForecast;

use crate::middleware::RequestId;

use super::{map_service_error, query_params, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ForecastQuery {
    lat: Option<String>,
    lon: Option<String>,
}

pub(super) async fn forecast(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<ForecastQuery>, QueryRejection>,
) -> Result<Json<NormalizedForecast>, ApiError> {
    let params = query_params(&req_id.0, query)?;
    state
        .service
        .forecast(params.lat.as_deref(), params.lon.as_deref())
        .await
        .map(Json)
        .map_err(|e| map_service_error(&req_id.0, &e))
}
