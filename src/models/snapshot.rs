//! Language statistics snapshot, the JSON document shared by the collector,
//! the server and the renderer.
//!
//! ```json
//! { "Rust": [ { "name": "owner/repo", "url": "https://github.com/owner/repo", "loc": 1234 } ] }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One repository's contribution to a language bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub loc: u64,
}

/// Strips everything up to and including the last `/`.
pub fn short_name(name: &str) -> &str {
    name.rsplit_once('/').map_or(name, |(_, tail)| tail)
}

/// Language name -> repository entries, in first-occurrence order.
pub type LanguageSnapshot = IndexMap<String, Vec<RepoEntry>>;

/// Serializes a snapshot as one newline-terminated JSON document.
pub fn to_document(snapshot: &LanguageSnapshot) -> Result<String> {
    let mut doc = serde_json::to_string(snapshot)?;
    doc.push('\n');
    Ok(doc)
}

pub fn from_document(doc: &str) -> Result<LanguageSnapshot> {
    Ok(serde_json::from_str(doc)?)
}
