use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use pagesmith_core::upload::validate_upload;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::store;

/// Asset uploads. Constraints (image MIME, ≤ 5 MiB) are enforced before
/// anything is persisted.
pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/uploads", post(upload))
}

async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::BadRequest("missing content-type header".to_string()))?
        .to_string();

    validate_upload(&content_type, body.len())?;

    let base = state.config().asset_base_url.trim_end_matches('/');
    let url = format!("{base}/{}", Uuid::new_v4().simple());
    store::insert_asset(state.pool(), &url, &content_type, body.len() as i64, Utc::now()).await?;

    tracing::info!(url = %url, size = body.len(), "asset stored");
    Ok(Json(json!({ "url": url })))
}
