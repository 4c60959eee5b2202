//! Snapshot refresh endpoint.
//!
//! GET|POST /stats/update
//!
//! Re-runs the collector when the snapshot is missing or older than the
//! staleness TTL. Answers in plain text: `skipped updating.` or the
//! collector's summary line.

use axum::{extract::State, routing::get, Router};

use crate::error::Result;
use crate::stats::SharedStore;

pub fn routes(store: SharedStore) -> Router {
    Router::new()
        .route("/stats/update", get(update).post(update))
        .with_state(store)
}

async fn update(State(store): State<SharedStore>) -> Result<String> {
    let status = store.refresh_if_stale().await?;
    tracing::info!("Update request: {}", status);
    Ok(status.to_string())
}
