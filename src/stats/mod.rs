//! Snapshot production and persistence.
//!
//! - `collector`: GitHub -> `LanguageSnapshot`, written as one JSON line
//! - `store`: read the snapshot, judge staleness, refresh when stale

pub mod collector;
pub mod store;

use std::sync::Arc;

pub use collector::{CollectionSummary, Collector};
pub use store::{RefreshStatus, SnapshotStore};

pub type SharedStore = Arc<SnapshotStore>;
