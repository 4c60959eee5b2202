//! Persisted snapshot access and stale-refresh.
//!
//! The snapshot file is only ever written by the collector. A snapshot is
//! stale when the file is missing or `mtime + ttl <= now`. Refreshes are
//! serialized behind an async mutex and staleness is checked again once the
//! lock is held, so a burst of update requests runs the collector once.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Mutex;

use crate::config::STALENESS_TTL;
use crate::error::{AppError, Result};
use crate::models::{snapshot, LanguageSnapshot};
use crate::stats::collector::{CollectionSummary, Collector};
use crate::sunburst::SnapshotSource;

pub struct SnapshotStore {
    path: PathBuf,
    collector: Collector,
    ttl: TimeDelta,
    refresh_lock: Mutex<()>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshStatus {
    Skipped,
    Refreshed(CollectionSummary),
}

impl std::fmt::Display for RefreshStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefreshStatus::Skipped => f.write_str("skipped updating."),
            RefreshStatus::Refreshed(summary) => summary.fmt(f),
        }
    }
}

/// `true` when there is no snapshot or it has outlived `ttl`.
pub fn is_stale_at(modified: Option<DateTime<Utc>>, ttl: TimeDelta, now: DateTime<Utc>) -> bool {
    match modified {
        None => true,
        Some(modified) => modified + ttl <= now,
    }
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>, collector: Collector) -> Self {
        Self {
            path: path.into(),
            collector,
            ttl: TimeDelta::seconds(STALENESS_TTL.as_secs() as i64),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// The snapshot document exactly as stored.
    pub async fn read(&self) -> Result<String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(doc) => Ok(doc),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound(self.path.display().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn load(&self) -> Result<LanguageSnapshot> {
        snapshot::from_document(&self.read().await?)
    }

    pub async fn modified_at(&self) -> Result<Option<DateTime<Utc>>> {
        match tokio::fs::metadata(&self.path).await {
            Ok(meta) => Ok(Some(DateTime::<Utc>::from(meta.modified()?))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn is_stale(&self) -> Result<bool> {
        Ok(is_stale_at(self.modified_at().await?, self.ttl, Utc::now()))
    }

    /// Runs the collector if the snapshot is stale, otherwise reports `Skipped`.
    pub async fn refresh_if_stale(&self) -> Result<RefreshStatus> {
        if !self.is_stale().await? {
            return Ok(RefreshStatus::Skipped);
        }

        let _guard = self.refresh_lock.lock().await;
        if !self.is_stale().await? {
            tracing::debug!("Snapshot refreshed by a concurrent request");
            return Ok(RefreshStatus::Skipped);
        }

        tracing::info!("Snapshot at {} is stale, collecting", self.path.display());
        let summary = self.collector.run(&self.path).await?;
        Ok(RefreshStatus::Refreshed(summary))
    }
}

#[async_trait]
impl SnapshotSource for SnapshotStore {
    async fn fetch(&self) -> Result<LanguageSnapshot> {
        self.load().await
    }
}
