//! Data types shared by the collector, the server and the renderer.
//!
//! - `repository`: `RepoRecord`, one repository with its language breakdown
//! - `snapshot`: `LanguageSnapshot` and `RepoEntry`, the persisted document
//!
//! Both maps are `IndexMap`s so JSON key order survives a round trip.

pub mod repository;
pub mod snapshot;

pub use repository::*;
pub use snapshot::*;
