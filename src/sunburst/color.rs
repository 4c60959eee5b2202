//! Arc colors.
//!
//! The root is white. Languages take the ten-color qualitative palette in
//! array order. Below that, a node's children are shaded along an HCL ramp
//! running from a darker to a brighter variant of the node's own color;
//! ramp steps are handed out by descending value, so the largest child is
//! the darkest no matter where it sits in the ring.

use palette::{Clamp, FromColor, Lch, Mix, Srgb};

use crate::sunburst::hierarchy::{Hierarchy, NodeId};

pub type Color = Srgb<u8>;

/// Lightness step of one darker/brighter shade, in CIE L units.
const SHADE_STEP: f32 = 18.0;

const CATEGORY10: [[u8; 3]; 10] = [
    [0x1f, 0x77, 0xb4],
    [0xff, 0x7f, 0x0e],
    [0x2c, 0xa0, 0x2c],
    [0xd6, 0x27, 0x28],
    [0x94, 0x67, 0xbd],
    [0x8c, 0x56, 0x4b],
    [0xe3, 0x77, 0xc2],
    [0x7f, 0x7f, 0x7f],
    [0xbc, 0xbd, 0x22],
    [0x17, 0xbe, 0xcf],
];

pub fn white() -> Color {
    Srgb::new(255, 255, 255)
}

pub fn category10(index: usize) -> Color {
    let [r, g, b] = CATEGORY10[index % CATEGORY10.len()];
    Srgb::new(r, g, b)
}

pub fn hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

pub fn to_lch(color: Color) -> Lch {
    Lch::from_color(color.into_format::<f32>())
}

fn from_lch(lch: Lch) -> Color {
    let rgb: Srgb<f32> = Srgb::from_color(lch);
    rgb.clamp().into_format()
}

fn shade(color: Color, delta: f32) -> Color {
    let mut lch = to_lch(color);
    lch.l += delta;
    from_lch(lch)
}

pub fn darker(color: Color) -> Color {
    shade(color, -SHADE_STEP)
}

pub fn brighter(color: Color) -> Color {
    shade(color, SHADE_STEP)
}

/// HCL interpolation from `darker(base)` to `brighter(base)` over `[0, n + 1]`.
struct Ramp {
    start: Lch,
    end: Lch,
    span: f32,
}

impl Ramp {
    fn new(base: Color, children: usize) -> Self {
        Self {
            start: to_lch(darker(base)),
            end: to_lch(brighter(base)),
            span: (children + 1) as f32,
        }
    }

    fn at(&self, step: usize) -> Color {
        from_lch(self.start.mix(self.end, step as f32 / self.span))
    }
}

/// Children ordered by descending value; equal values keep array order.
pub fn rank_by_value(hierarchy: &Hierarchy, children: &[NodeId]) -> Vec<NodeId> {
    let mut ranked = children.to_vec();
    ranked.sort_by(|&a, &b| hierarchy.node(b).value.cmp(&hierarchy.node(a).value));
    ranked
}

/// One color per node, indexed like the hierarchy's arena.
pub fn assign_colors(hierarchy: &Hierarchy) -> Vec<Color> {
    let mut colors = vec![white(); hierarchy.len()];

    for (id, node) in hierarchy.nodes().iter().enumerate() {
        if node.is_leaf() {
            continue;
        }
        if node.parent.is_none() {
            for (i, &child) in node.children.iter().enumerate() {
                colors[child] = category10(i);
            }
        } else {
            let ramp = Ramp::new(colors[id], node.children.len());
            for (step, child) in rank_by_value(hierarchy, &node.children).into_iter().enumerate() {
                colors[child] = ramp.at(step);
            }
        }
    }

    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LanguageSnapshot, RepoEntry};
    use crate::sunburst::fixtures::go_rust_snapshot;
    use crate::sunburst::hierarchy::ROOT;

    fn snapshot_with(lang: &str, locs: &[u64]) -> LanguageSnapshot {
        let mut snapshot = LanguageSnapshot::new();
        snapshot.insert(
            lang.to_string(),
            locs.iter()
                .enumerate()
                .map(|(i, &loc)| RepoEntry {
                    name: format!("owner/repo{i}"),
                    url: None,
                    loc,
                })
                .collect(),
        );
        snapshot
    }

    #[test]
    fn root_is_white_and_languages_follow_palette_order() {
        let h = Hierarchy::from_snapshot(&go_rust_snapshot());
        let colors = assign_colors(&h);

        assert_eq!(hex(colors[ROOT]), "#ffffff");
        assert_eq!(hex(colors[h.find_language("Go").unwrap()]), "#1f77b4");
        assert_eq!(hex(colors[h.find_language("Rust").unwrap()]), "#ff7f0e");
    }

    #[test]
    fn palette_cycles_after_ten() {
        assert_eq!(category10(10), category10(0));
        assert_eq!(hex(category10(13)), "#d62728");
    }

    #[test]
    fn shades_move_lightness() {
        let base = category10(0);
        assert!(to_lch(darker(base)).l < to_lch(base).l);
        assert!(to_lch(brighter(base)).l > to_lch(base).l);
    }

    #[test]
    fn ramp_follows_value_rank_not_array_order() {
        // array order: 10, 500, 70 -> rank order: 500, 70, 10
        let h = Hierarchy::from_snapshot(&snapshot_with("Rust", &[10, 500, 70]));
        let colors = assign_colors(&h);
        let lang = h.find_language("Rust").unwrap();
        let kids = &h.node(lang).children;

        let ranked = rank_by_value(&h, kids);
        assert_eq!(ranked, vec![kids[1], kids[2], kids[0]]);

        let lightness: Vec<f32> = ranked.iter().map(|&c| to_lch(colors[c]).l).collect();
        assert!(lightness.windows(2).all(|w| w[0] < w[1]), "{lightness:?}");

        // largest child sits at the dark end of the ramp, below the parent
        assert!(lightness[0] < to_lch(colors[lang]).l);
    }

    #[test]
    fn equal_values_keep_array_order() {
        let h = Hierarchy::from_snapshot(&snapshot_with("Go", &[5, 5, 5]));
        let lang = h.find_language("Go").unwrap();
        let kids = h.node(lang).children.clone();
        assert_eq!(rank_by_value(&h, &kids), kids);
    }
}
