//! Side legend: one row per child of the focused node.

use crate::sunburst::color::Color;
use crate::sunburst::hierarchy::{Hierarchy, NodeId};

pub const ROW_HEIGHT: f64 = 30.0;
pub const SWATCH_SIZE: f64 = 15.0;

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub node: NodeId,
    pub label: String,
    pub color: Color,
    /// Repository page, or `#` for nodes without one.
    pub href: String,
    /// Baseline of the label text, relative to the legend origin.
    pub y: f64,
    pub zoomable: bool,
}

pub fn legend_for(hierarchy: &Hierarchy, colors: &[Color], focus: NodeId) -> Vec<LegendEntry> {
    hierarchy
        .node(focus)
        .children
        .iter()
        .enumerate()
        .map(|(i, &child)| {
            let node = hierarchy.node(child);
            LegendEntry {
                node: child,
                label: node.label().to_string(),
                color: colors[child],
                href: node.url.clone().unwrap_or_else(|| "#".to_string()),
                y: i as f64 * ROW_HEIGHT,
                zoomable: !node.is_leaf(),
            }
        })
        .collect()
}
