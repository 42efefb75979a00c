use axum::{extract::State, Extension, Json};

use crate::middleware::RequestId;
use crate::store::SearchRecord;

use super::{map_service_error, ApiError, AppState};

/// Successful forward-geocoding queries, oldest first.
pub(super) async fn list(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<Vec<SearchRecord>>, ApiError> {
    state
        .service
        .search_history()
        .await
        .map(Json)
        .map_err(|e| map_service_error(&req_id.0, &e))
}
