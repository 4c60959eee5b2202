//! HTTP route handlers for the snapshot server.
//!
//! Each submodule defines routes for one area:
//! - `stats`: chart page and raw snapshot (GET /stats, /stat.json, /stats.json)
//! - `update`: stale-refresh trigger (GET|POST /stats/update)
//! - `health`: liveness and snapshot age (GET /health)
//! - `assets`: embedded stylesheet (GET /assets/*)

pub mod assets;
pub mod health;
pub mod stats;
pub mod update;

use axum::Router;

use crate::stats::SharedStore;

pub fn create_router(store: SharedStore) -> Router {
    Router::new()
        .merge(stats::routes(store.clone()))
        .merge(update::routes(store.clone()))
        .merge(health::routes(store))
        .merge(assets::routes())
}
