//! GitHub REST client.
//!
//! - GET /user/repos?affiliation=owner&per_page=100&page=N
//!   Paged until a short page comes back.
//! - GET /repos/{owner}/{repo}/languages
//!   Language -> bytes object, kept in response order.
//!
//! A missing token is reported as `Authentication` before any request is made;
//! a 401 from GitHub is reported the same way.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::github::SourceHost;
use crate::models::{HostedRepo, LanguageBreakdown};

const USER_AGENT: &str = concat!("langs-stat/", env!("CARGO_PKG_VERSION"));
const PAGE_SIZE: usize = 100;

pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
    has_token: bool,
}

#[derive(Debug, Deserialize)]
struct GitHubRepository {
    full_name: String,
    html_url: String,
    #[serde(default)]
    fork: bool,
}

impl GitHubClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        if let Some(t) = token {
            let mut auth_value =
                HeaderValue::from_str(&format!("token {t}")).map_err(|_| {
                    AppError::Authentication("access token is not a valid header value".to_string())
                })?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        tracing::info!("Created GitHub API client for {}", base_url);

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            has_token: token.is_some(),
        })
    }

    async fn get(&self, endpoint: &str) -> Result<reqwest::Response> {
        if !self.has_token {
            return Err(AppError::Authentication("no access token configured".to_string()));
        }

        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(AppError::Authentication(format!(
                "GitHub rejected the access token ({status})"
            )));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Api(format!("{status} from {url}: {}", body.trim())));
        }

        Ok(response)
    }
}

#[async_trait]
impl SourceHost for GitHubClient {
    async fn owned_repositories(&self) -> Result<Vec<HostedRepo>> {
        let mut repos = Vec::new();
        let mut page = 1;

        loop {
            let endpoint = format!("user/repos?affiliation=owner&per_page={PAGE_SIZE}&page={page}");
            let batch: Vec<GitHubRepository> = self.get(&endpoint).await?.json().await?;
            let fetched = batch.len();

            repos.extend(batch.into_iter().map(|r| HostedRepo {
                full_name: r.full_name,
                html_url: r.html_url,
                fork: r.fork,
            }));

            if fetched < PAGE_SIZE {
                break;
            }
            page += 1;
        }

        tracing::info!("Listed {} repositories", repos.len());
        Ok(repos)
    }

    async fn languages(&self, full_name: &str) -> Result<LanguageBreakdown> {
        let endpoint = format!("repos/{full_name}/languages");
        Ok(self.get(&endpoint).await?.json().await?)
    }
}
