//! Source-control host access.
//!
//! `SourceHost` is what the collector needs from the host: the account's
//! repositories and one language breakdown per repository. `GitHubClient`
//! implements it over the GitHub REST API.

pub mod client;
pub mod credentials;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{HostedRepo, LanguageBreakdown};

pub use client::GitHubClient;

#[async_trait]
pub trait SourceHost: Send + Sync {
    /// All repositories owned by the authenticated account, forks included.
    async fn owned_repositories(&self) -> Result<Vec<HostedRepo>>;

    /// Language -> byte count for `owner/repo`, in the host's order.
    async fn languages(&self, full_name: &str) -> Result<LanguageBreakdown>;
}
