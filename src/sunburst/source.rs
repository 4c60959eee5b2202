//! Where the renderer gets its snapshot from.

use async_trait::async_trait;
use reqwest::Url;

use crate::error::{AppError, Result};
use crate::models::LanguageSnapshot;

/// Relative path of the snapshot, resolved against the chart page.
pub const SNAPSHOT_FILE: &str = "stat.json";

#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch(&self) -> Result<LanguageSnapshot>;
}

/// Fetches `stat.json` relative to the page that hosts the chart.
pub struct HttpSnapshotSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpSnapshotSource {
    pub fn for_page(page: &str) -> Result<Self> {
        let page = Url::parse(page)
            .map_err(|e| AppError::Internal(format!("invalid page URL {page}: {e}")))?;
        let url = page
            .join(SNAPSHOT_FILE)
            .map_err(|e| AppError::Internal(format!("cannot resolve {SNAPSHOT_FILE}: {e}")))?;
        Ok(Self {
            client: reqwest::Client::new(),
            url,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    async fn fetch(&self) -> Result<LanguageSnapshot> {
        tracing::debug!("Fetching snapshot from {}", self.url);
        let response = self.client.get(self.url.clone()).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};

    #[test]
    fn resolves_relative_to_page() {
        let src = HttpSnapshotSource::for_page("http://example.com/stats").unwrap();
        assert_eq!(src.url().as_str(), "http://example.com/stat.json");

        let src = HttpSnapshotSource::for_page("http://example.com/me/langs/").unwrap();
        assert_eq!(src.url().as_str(), "http://example.com/me/langs/stat.json");
    }

    #[test]
    fn rejects_garbage_page() {
        assert!(HttpSnapshotSource::for_page("not a url").is_err());
    }

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/stats")
    }

    #[tokio::test]
    async fn fetches_snapshot_over_http() {
        let app = Router::new().route(
            "/stat.json",
            get(|| async { r#"{"Go":[{"name":"a/x","url":"u1","loc":100}]}"# }),
        );
        let src = HttpSnapshotSource::for_page(&serve(app).await).unwrap();

        let snapshot = src.fetch().await.unwrap();
        assert_eq!(snapshot.get("Go").unwrap()[0].loc, 100);
    }

    #[tokio::test]
    async fn http_failure_is_an_error() {
        let app = Router::new().route("/stat.json", get(|| async { StatusCode::NOT_FOUND }));
        let src = HttpSnapshotSource::for_page(&serve(app).await).unwrap();

        assert!(matches!(src.fetch().await, Err(AppError::Http(_))));
    }
}
