//! Zoomable sunburst of the language snapshot.
//!
//! The chart is a three-level tree (all languages, language, repository)
//! laid out as a partition, colored, and drawn as SVG arcs. Clicking a node
//! with children zooms into it.

pub mod color;
pub mod hierarchy;
pub mod legend;
pub mod partition;
pub mod renderer;
pub mod scale;
pub mod source;
pub mod svg;
pub mod transition;

pub use hierarchy::{Hierarchy, NodeId, ROOT, ROOT_NAME};
pub use renderer::{Chart, ChartSize, RenderState, Renderer};
pub use source::{HttpSnapshotSource, SnapshotSource};
pub use svg::render_svg;

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::{LanguageSnapshot, RepoEntry};

    fn entry(name: &str, url: &str, loc: u64) -> RepoEntry {
        RepoEntry {
            name: name.to_string(),
            url: Some(url.to_string()),
            loc,
        }
    }

    /// `Go: a/x 100`, `Rust: a/y 30, b/z 20`.
    pub fn sample_snapshot() -> LanguageSnapshot {
        let mut snapshot = LanguageSnapshot::new();
        snapshot.insert("Go".to_string(), vec![entry("a/x", "u1", 100)]);
        snapshot.insert(
            "Rust".to_string(),
            vec![entry("a/y", "u2", 30), entry("b/z", "u3", 20)],
        );
        snapshot
    }

    /// `Go: a/x 100`, `Rust: a/y 50`.
    pub fn go_rust_snapshot() -> LanguageSnapshot {
        let mut snapshot = LanguageSnapshot::new();
        snapshot.insert("Go".to_string(), vec![entry("a/x", "u1", 100)]);
        snapshot.insert("Rust".to_string(), vec![entry("a/y", "u2", 50)]);
        snapshot
    }
}
