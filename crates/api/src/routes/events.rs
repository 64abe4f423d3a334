use std::convert::Infallible;

use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures::stream::{unfold, Stream};
use tokio::sync::broadcast;
use uuid::Uuid;

use pagesmith_core::events::ConfigEvent;

use crate::state::AppState;

/// SSE stream of persistence events for one configuration. Drives the
/// editor's save indicator and version list refresh.
pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/configs/{id}/events", get(config_events))
}

async fn config_events(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.event_bus().subscribe();
    let stream = unfold(rx, move |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) if event.config_id() == id => {
                    let data = match serde_json::to_string(&event) {
                        Ok(data) => data,
                        Err(err) => {
                            tracing::error!(%err, "config event failed to serialize");
                            continue;
                        }
                    };
                    return Some((Ok::<_, Infallible>(Event::default().data(data)), rx));
                }
                // Events for other configurations.
                Ok(_) => continue,
                // A slow consumer missed some events; keep streaming.
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event listener lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}
