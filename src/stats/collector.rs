//! Stats collector: GitHub repositories -> language snapshot.
//!
//! 1. List the account's repositories and drop forks.
//! 2. Fetch every language breakdown concurrently (bounded, order preserved).
//!    All fetches finish before anything is aggregated; the first failure in
//!    repository order fails the whole run as `Fetch { repo }`.
//! 3. Sort repositories by full name and append one entry per language.
//! 4. Write the snapshot as one JSON line. Nothing is written on error.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};

use crate::config::CollectorSettings;
use crate::error::{AppError, Result};
use crate::github::{credentials, GitHubClient, SourceHost};
use crate::models::{snapshot, LanguageSnapshot, RepoEntry, RepoRecord};

pub struct Collector {
    host: Arc<dyn SourceHost>,
    concurrency: usize,
    retain_urls: bool,
}

/// What a successful run produced, for logs and the update endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSummary {
    pub repositories: usize,
    pub forks_skipped: usize,
    pub languages: usize,
}

impl std::fmt::Display for CollectionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "updated {} languages from {} repositories ({} forks skipped).",
            self.languages, self.repositories, self.forks_skipped
        )
    }
}

impl Collector {
    pub fn new(host: Arc<dyn SourceHost>, concurrency: usize, retain_urls: bool) -> Self {
        Self {
            host,
            concurrency: concurrency.max(1),
            retain_urls,
        }
    }

    /// GitHub-backed collector. A missing token is not an error here; it
    /// surfaces as `Authentication` when the collector runs.
    pub fn from_settings(settings: &CollectorSettings) -> Result<Self> {
        let token = match credentials::resolve_token(&settings.token_file) {
            Ok(token) => Some(token),
            Err(AppError::Authentication(msg)) => {
                tracing::warn!("{}", msg);
                None
            }
            Err(e) => return Err(e),
        };
        let client = GitHubClient::new(&settings.api_url, token.as_deref())?;
        Ok(Self::new(
            Arc::new(client),
            settings.concurrency,
            settings.retain_urls(),
        ))
    }

    /// Fetches every non-fork repository's languages and aggregates them.
    pub async fn collect(&self) -> Result<(LanguageSnapshot, CollectionSummary)> {
        let started = Instant::now();
        let listed = self.host.owned_repositories().await?;
        let total = listed.len();
        let owned: Vec<_> = listed.into_iter().filter(|r| !r.fork).collect();
        let forks_skipped = total - owned.len();

        tracing::info!(
            "Fetching languages for {} repositories ({} forks skipped)",
            owned.len(),
            forks_skipped
        );

        let host = &self.host;
        let results: Vec<(String, String, Result<_>)> = stream::iter(owned)
            .map(|repo| async move {
                tracing::debug!("Fetching languages for {}", repo.full_name);
                let languages = host.languages(&repo.full_name).await;
                (repo.full_name, repo.html_url, languages)
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut records = Vec::with_capacity(results.len());
        for (name, url, languages) in results {
            match languages {
                Ok(languages) => records.push(RepoRecord { name, url, languages }),
                Err(e @ AppError::Authentication(_)) => {
                    tracing::warn!("Credentials rejected while fetching {}: {}", name, e);
                    return Err(e);
                }
                Err(e) => {
                    tracing::warn!("Language fetch failed for {}: {}", name, e);
                    return Err(AppError::Fetch {
                        repo: name,
                        source: Box::new(e),
                    });
                }
            }
        }

        let repositories = records.len();
        let snapshot = aggregate(records, self.retain_urls);
        let summary = CollectionSummary {
            repositories,
            forks_skipped,
            languages: snapshot.len(),
        };

        tracing::info!("Collected {} languages in {:?}", summary.languages, started.elapsed());
        Ok((snapshot, summary))
    }

    /// Collects and overwrites the snapshot at `path`.
    pub async fn run(&self, path: &Path) -> Result<CollectionSummary> {
        let (snapshot, summary) = self.collect().await?;
        write_snapshot(path, &snapshot).await?;
        tracing::info!("Wrote snapshot to {}", path.display());
        Ok(summary)
    }
}

/// Sorts records by name, then appends one entry per language in that order.
pub fn aggregate(mut records: Vec<RepoRecord>, retain_urls: bool) -> LanguageSnapshot {
    records.sort_by(|a, b| a.name.cmp(&b.name));

    let mut snapshot = LanguageSnapshot::new();
    for record in records {
        for (language, loc) in record.languages.iter() {
            snapshot.entry(language.clone()).or_default().push(RepoEntry {
                name: record.name.clone(),
                url: retain_urls.then(|| record.url.clone()),
                loc: *loc,
            });
        }
    }
    snapshot
}

pub async fn write_snapshot(path: &Path, snapshot: &LanguageSnapshot) -> Result<()> {
    let doc = snapshot::to_document(snapshot)?;
    tokio::fs::write(path, doc).await?;
    Ok(())
}
