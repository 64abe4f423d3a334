use axum::{
    extract::{Path, State},
    routing::put,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use pagesmith_core::config::PageConfig;
use pagesmith_core::events::ConfigEvent;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::store;

/// Scheduling. Setting and cancelling are distinct operations; cancel is
/// its own verb, not a PATCH carrying nulls.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/v1/configs/{id}/schedule",
        put(set_schedule).delete(clear_schedule),
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleRequest {
    scheduled_at: DateTime<Utc>,
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
}

async fn set_schedule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ScheduleRequest>,
) -> ApiResult<Json<PageConfig>> {
    if let Some(expires_at) = req.expires_at {
        if expires_at <= req.scheduled_at {
            return Err(ApiError::BadRequest(
                "expiresAt must be after scheduledAt".to_string(),
            ));
        }
    }
    let config =
        store::set_schedule(state.pool(), id, req.scheduled_at, req.expires_at, Utc::now())
            .await?;
    state.event_bus().publish(ConfigEvent::Scheduled {
        config_id: id,
        scheduled_at: req.scheduled_at,
        expires_at: req.expires_at,
    });
    Ok(Json(config))
}

async fn clear_schedule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PageConfig>> {
    let config = store::clear_schedule(state.pool(), id, Utc::now()).await?;
    state
        .event_bus()
        .publish(ConfigEvent::ScheduleCleared { config_id: id });
    Ok(Json(config))
}
