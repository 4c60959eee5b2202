use serde::{Deserialize, Serialize};

use indexmap::IndexMap;

/// Language -> byte count, in the order the host reported them.
pub type LanguageBreakdown = IndexMap<String, u64>;

/// Hosted repository as listed for the authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedRepo {
    /// `owner/repo`
    pub full_name: String,
    pub html_url: String,
    pub fork: bool,
}

/// A repository with its language -> byte count breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRecord {
    pub name: String,
    pub url: String,
    pub languages: LanguageBreakdown,
}
