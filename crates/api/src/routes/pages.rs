use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use pagesmith_compose::weighting::{assign, Assignment};
use pagesmith_compose::compose;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::store;

/// Visitor-facing page composition.
pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/pages/{route}", get(compose_page))
}

#[derive(Debug, Deserialize)]
struct ComposeQuery {
    /// Stable visitor identifier used for sticky A/B assignment. Without
    /// one, the visitor sees the control.
    visitor: Option<String>,
    #[serde(default)]
    preview: bool,
}

/// Resolve the live configuration for a route, pick the visitor's variant,
/// and compose the page. A single broken section never breaks the page;
/// an empty page composes to a placeholder unit.
async fn compose_page(
    State(state): State<AppState>,
    Path(route): Path<String>,
    Query(query): Query<ComposeQuery>,
) -> ApiResult<Json<Value>> {
    let now = Utc::now();
    let config = store::live_config_for_route(state.pool(), &route, now)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no live configuration for route {route}")))?;

    let (served, assignment) = match &query.visitor {
        Some(visitor) => {
            let weights = store::variant_weights(state.pool(), config.id).await?;
            match assign(&config.id.to_string(), visitor, &weights) {
                Assignment::Control => (config, Assignment::Control),
                Assignment::Variant { id } => {
                    let variant_id: Uuid = id
                        .parse()
                        .map_err(|_| ApiError::Internal(format!("malformed variant id {id}")))?;
                    let variant = store::get_config(state.pool(), variant_id).await?;
                    (variant, Assignment::Variant { id })
                }
            }
        }
        None => (config, Assignment::Control),
    };

    let units = compose(&served.sections, now, query.preview);
    Ok(Json(json!({
        "route": route,
        "configId": served.id,
        "assignment": assignment,
        "units": units,
    })))
}
