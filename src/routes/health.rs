//! Liveness endpoint.
//!
//! GET /health
//!
//! Always 200 while the server runs. Also reports whether a snapshot exists,
//! when it was written, and whether it is stale.

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::stats::store::is_stale_at;
use crate::stats::SharedStore;

pub fn routes(store: SharedStore) -> Router {
    Router::new()
        .route("/health", get(get_health))
        .with_state(store)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Health {
    status: &'static str,
    snapshot: String,
    modified_at: Option<DateTime<Utc>>,
    stale: bool,
}

async fn get_health(State(store): State<SharedStore>) -> Result<Json<Health>> {
    let modified_at = store.modified_at().await?;
    let stale = is_stale_at(modified_at, store.ttl(), Utc::now());
    Ok(Json(Health {
        status: "ok",
        snapshot: store.path().display().to_string(),
        modified_at,
        stale,
    }))
}
