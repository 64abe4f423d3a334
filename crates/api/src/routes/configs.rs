use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use pagesmith_core::config::{validate_config_fields, ConfigPatch, PageConfig};
use pagesmith_core::events::ConfigEvent;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::store;

/// Configuration CRUD.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/configs", post(create_config))
        .route(
            "/v1/configs/{id}",
            get(get_config).patch(patch_config),
        )
        .route("/v1/configs/{id}/publish", post(publish_config))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateConfigRequest {
    name: String,
    route: String,
    #[serde(default)]
    description: Option<String>,
}

async fn create_config(
    State(state): State<AppState>,
    Json(req): Json<CreateConfigRequest>,
) -> ApiResult<Json<PageConfig>> {
    validate_config_fields(&req.name, &req.route)?;
    let config = store::create_config(
        state.pool(),
        &req.name,
        &req.route,
        req.description.as_deref(),
        Utc::now(),
    )
    .await?;
    Ok(Json(config))
}

async fn get_config(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PageConfig>> {
    Ok(Json(store::get_config(state.pool(), id).await?))
}

/// Partial update: only the fields present in the body change. The section
/// auto-save and the SEO panel both go through here with disjoint field
/// groups and must not clobber each other.
async fn patch_config(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ConfigPatch>,
) -> ApiResult<Json<PageConfig>> {
    // An empty body changes nothing; skip the write and the save event.
    if patch.is_empty() {
        return Ok(Json(store::get_config(state.pool(), id).await?));
    }
    let now = Utc::now();
    let config = store::patch_config(state.pool(), id, patch, now).await?;
    state.event_bus().publish(ConfigEvent::Saved {
        config_id: id,
        updated_at: config.updated_at,
    });
    Ok(Json(config))
}

async fn publish_config(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PageConfig>> {
    let config = store::publish_config(state.pool(), id, Utc::now()).await?;
    tracing::info!(config_id = %id, route = %config.route, "configuration published");
    Ok(Json(config))
}
