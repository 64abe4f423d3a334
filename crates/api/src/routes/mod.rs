pub mod configs;
pub mod events;
pub mod health;
pub mod pages;
pub mod schedule;
pub mod uploads;
pub mod variants;
pub mod versions;

use axum::Router;

use crate::state::AppState;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(configs::routes())
        .merge(versions::routes())
        .merge(variants::routes())
        .merge(schedule::routes())
        .merge(uploads::routes())
        .merge(pages::routes())
        .merge(events::routes())
        .with_state(state)
}
