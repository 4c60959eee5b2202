//! Chart page and raw snapshot endpoints.
//!
//! GET /stats?focus=&from=   - sunburst page, or the raw snapshot when the
//!                             client asks for JSON
//! GET /stat.json            - raw snapshot, the chart's relative fetch target
//! GET /stats.json           - same document
//! GET /                     - redirects to /stats
//!
//! `focus` names the language to zoom into (empty or absent is the root).
//! `from` names the previous focus; when given, the page animates the zoom.

use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use askama::Template;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::stats::SharedStore;
use crate::sunburst::svg::focus_link;
use crate::sunburst::{render_svg, Chart, ChartSize, NodeId, ROOT};
use crate::templates::{EmptyTemplate, StatsTemplate};

pub fn routes(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/stats") }))
        .route("/stats", get(get_stats))
        .route("/stat.json", get(get_snapshot))
        .route("/stats.json", get(get_snapshot))
        .with_state(store)
}

#[derive(Debug, Default, Deserialize)]
struct FocusQuery {
    focus: Option<String>,
    from: Option<String>,
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"))
}

async fn get_snapshot(State(store): State<SharedStore>) -> Result<Response> {
    let doc = store.read().await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], doc).into_response())
}

async fn get_stats(
    State(store): State<SharedStore>,
    Query(query): Query<FocusQuery>,
    headers: HeaderMap,
) -> Result<Response> {
    if wants_json(&headers) {
        return get_snapshot(State(store)).await;
    }

    let snapshot = match store.load().await {
        Ok(snapshot) => snapshot,
        Err(AppError::NotFound(path)) => {
            tracing::debug!("No snapshot at {}", path);
            let page = EmptyTemplate::default().render()?;
            return Ok((StatusCode::NOT_FOUND, Html(page)).into_response());
        }
        Err(e) => return Err(e),
    };

    let mut chart = Chart::new(&snapshot, ChartSize::default());
    let target = resolve_focus(&chart, query.focus.as_deref());
    match query.from.as_deref() {
        Some(from) => {
            chart.jump_to(resolve_focus(&chart, Some(from)));
            chart.click(target, Duration::ZERO);
        }
        None => {
            chart.jump_to(target);
        }
    }

    let svg = render_svg(&chart, Duration::ZERO, |node| focus_link(&chart, node))?;
    let page = StatsTemplate::new(chart.center_label(), svg).render()?;
    Ok(Html(page).into_response())
}

/// Empty or unknown names fall back to the root.
fn resolve_focus(chart: &Chart, name: Option<&str>) -> NodeId {
    match name.filter(|n| !n.is_empty()) {
        Some(name) => chart.hierarchy().find_language(name).unwrap_or_else(|| {
            tracing::debug!("Unknown focus {:?}, showing all languages", name);
            ROOT
        }),
        None => ROOT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::snapshot;
    use crate::routes::testing::{body_text, get, send, store_at};
    use crate::stats::collector::tests::FakeHost;
    use crate::sunburst::fixtures::{go_rust_snapshot, sample_snapshot};
    use axum::body::Body;
    use axum::http::Request;

    fn app_with(doc: Option<&str>) -> (tempfile::TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("langs_stat.json");
        if let Some(doc) = doc {
            std::fs::write(&path, doc).unwrap();
        }
        let app = routes(store_at(&path, FakeHost::default()));
        (dir, app)
    }

    fn go_rust_doc() -> String {
        snapshot::to_document(&go_rust_snapshot()).unwrap()
    }

    #[tokio::test]
    async fn stat_json_is_verbatim() {
        let doc = go_rust_doc();
        let (_dir, app) = app_with(Some(&doc));

        for uri in ["/stat.json", "/stats.json"] {
            let res = get(app.clone(), uri).await;
            assert_eq!(res.status(), StatusCode::OK);
            assert_eq!(res.headers()[header::CONTENT_TYPE], "application/json");
            assert_eq!(body_text(res).await, doc);
        }
    }

    #[tokio::test]
    async fn missing_snapshot_is_404_json() {
        let (_dir, app) = app_with(None);
        let res = get(app, "/stat.json").await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = serde_json::from_str(&body_text(res).await).unwrap();
        assert!(body["error"].as_str().unwrap().contains("langs_stat.json"));
    }

    #[tokio::test]
    async fn stats_negotiates_json() {
        let doc = go_rust_doc();
        let (_dir, app) = app_with(Some(&doc));
        let req = Request::get("/stats")
            .header(header::ACCEPT, "application/json")
            .body(Body::empty())
            .unwrap();

        let res = send(app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_text(res).await, doc);
    }

    #[tokio::test]
    async fn stats_page_draws_root_chart() {
        let (_dir, app) = app_with(Some(&go_rust_doc()));
        let res = get(app, "/stats").await;

        assert_eq!(res.status(), StatusCode::OK);
        let html = body_text(res).await;
        assert!(html.contains("<svg"));
        assert!(html.contains(">All Languages</text>"));
        assert!(html.contains(r#"<text y="0">Go</text>"#));
        assert!(html.contains(r#"<text y="30">Rust</text>"#));
        assert!(html.contains("?focus=Go&amp;from="));
        assert!(!html.contains("<animate"));
    }

    #[tokio::test]
    async fn focus_with_from_animates_the_zoom() {
        let (_dir, app) = app_with(Some(&go_rust_doc()));
        let res = get(app, "/stats?focus=Go&from=").await;

        let html = body_text(res).await;
        assert!(html.contains(">Go</text>"));
        assert!(html.contains(r#"<a href="u1" target="_blank"><rect"#));
        assert!(html.contains(r#"<text y="0">x</text>"#));
        assert!(html.contains("<animate"));
    }

    #[tokio::test]
    async fn focus_without_from_is_static() {
        let doc = snapshot::to_document(&sample_snapshot()).unwrap();
        let (_dir, app) = app_with(Some(&doc));
        let html = body_text(get(app, "/stats?focus=Rust").await).await;

        assert!(html.contains(r#"<text y="30">z</text>"#));
        assert!(!html.contains("<animate"));
    }

    #[tokio::test]
    async fn unknown_focus_shows_root() {
        let (_dir, app) = app_with(Some(&go_rust_doc()));
        let html = body_text(get(app, "/stats?focus=a%2Fx").await).await;
        assert!(html.contains(">All Languages</text>"));
    }

    #[tokio::test]
    async fn missing_snapshot_renders_empty_state() {
        let (_dir, app) = app_with(None);
        let res = get(app, "/stats").await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let html = body_text(res).await;
        assert!(html.contains("No statistics have been collected yet."));
        assert!(!html.contains("<svg"));
    }

    #[tokio::test]
    async fn root_redirects_to_stats() {
        let (_dir, app) = app_with(None);
        let res = get(app, "/").await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()[header::LOCATION], "/stats");
    }
}
