use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use uuid::Uuid;

use pagesmith_core::config::{PageConfig, VersionSummary};
use pagesmith_core::events::ConfigEvent;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::store;

/// Version snapshots: list, create, restore.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/configs/{id}/versions",
            get(list_versions).post(create_version),
        )
        .route(
            "/v1/configs/{id}/versions/{number}/restore",
            post(restore_version),
        )
}

/// Newest first.
async fn list_versions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<VersionSummary>>> {
    Ok(Json(store::list_versions(state.pool(), id).await?))
}

async fn create_version(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<VersionSummary>> {
    let summary = store::create_version(state.pool(), id, Utc::now()).await?;
    state.event_bus().publish(ConfigEvent::VersionCreated {
        config_id: id,
        version_number: summary.version_number,
    });
    Ok(Json(summary))
}

/// All-or-nothing: a failed restore leaves the current state untouched.
async fn restore_version(
    State(state): State<AppState>,
    Path((id, number)): Path<(Uuid, i32)>,
) -> ApiResult<Json<PageConfig>> {
    let config = store::restore_version(state.pool(), id, number, Utc::now()).await?;
    state.event_bus().publish(ConfigEvent::VersionRestored {
        config_id: id,
        version_number: number,
    });
    Ok(Json(config))
}
