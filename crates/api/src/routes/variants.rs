use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use pagesmith_core::config::PageConfig;
use pagesmith_core::events::ConfigEvent;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::store;

/// A/B variants of a configuration.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/v1/configs/{id}/variants",
        get(list_variants).post(create_variant),
    )
}

async fn list_variants(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<PageConfig>>> {
    Ok(Json(store::list_variants(state.pool(), id).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateVariantRequest {
    name: String,
    /// Traffic share in whole percent, 1..=100.
    weight: u32,
}

/// Copy-on-write clone of the original. Rejected with the remaining
/// capacity in the error when the weight wouldn't fit the budget.
async fn create_variant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateVariantRequest>,
) -> ApiResult<Json<PageConfig>> {
    let variant =
        store::create_variant(state.pool(), id, &req.name, req.weight, Utc::now()).await?;
    state.event_bus().publish(ConfigEvent::VariantCreated {
        config_id: id,
        variant_id: variant.id,
        weight: req.weight,
    });
    Ok(Json(variant))
}
