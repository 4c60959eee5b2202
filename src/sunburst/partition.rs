//! Partition layout in the unit square.
//!
//! `x`/`dx` is the angular share of the full circle, `y`/`dy` the radial
//! band. Every level gets the same band height, `1 / (max_depth + 1)`.
//! Children split their parent's `dx` in proportion to their values and in
//! array order; a zero-valued parent gives its children zero width.

use crate::sunburst::hierarchy::{Hierarchy, ROOT};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    pub x: f64,
    pub dx: f64,
    pub y: f64,
    pub dy: f64,
}

/// One extent per node, indexed like the hierarchy's arena.
pub fn partition(hierarchy: &Hierarchy) -> Vec<Extent> {
    let mut layout = vec![Extent::default(); hierarchy.len()];
    if hierarchy.is_empty() {
        return layout;
    }

    let dy = 1.0 / (hierarchy.max_depth() + 1) as f64;
    layout[ROOT] = Extent {
        x: 0.0,
        dx: 1.0,
        y: 0.0,
        dy,
    };

    // pre-order: a parent's extent is final before its children are visited
    for (id, node) in hierarchy.nodes().iter().enumerate() {
        if node.is_leaf() {
            continue;
        }
        let parent = layout[id];
        let k = if node.value > 0 {
            parent.dx / node.value as f64
        } else {
            0.0
        };

        let mut x = parent.x;
        for &child in &node.children {
            let dx = hierarchy.node(child).value as f64 * k;
            layout[child] = Extent {
                x,
                dx,
                y: hierarchy.node(child).depth as f64 * dy,
                dy,
            };
            x += dx;
        }
    }

    layout
}
