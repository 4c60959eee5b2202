//! Scale state and arc geometry.
//!
//! `Scales` maps layout coordinates to screen: `x` to an angle in
//! `[0, 2π]`, `y` to a radius. Zooming only ever changes the domains and the
//! radial range; the angular range is fixed.

use std::f64::consts::TAU;
use std::fmt::Write;

use crate::sunburst::partition::Extent;

/// Gap left on each side of a ring boundary, in pixels.
pub const ARC_INSET: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scales {
    pub theta_domain: [f64; 2],
    pub radius_domain: [f64; 2],
    pub radius_range: [f64; 2],
}

fn linear(domain: [f64; 2], range: [f64; 2], v: f64) -> f64 {
    let span = domain[1] - domain[0];
    let t = if span != 0.0 { (v - domain[0]) / span } else { 0.0 };
    range[0] + t * (range[1] - range[0])
}

fn lerp2(a: [f64; 2], b: [f64; 2], t: f64) -> [f64; 2] {
    [a[0] + (b[0] - a[0]) * t, a[1] + (b[1] - a[1]) * t]
}

impl Scales {
    /// Whole chart visible: root in the middle, leaves at the rim.
    pub fn full(max_radius: f64) -> Self {
        Self {
            theta_domain: [0.0, 1.0],
            radius_domain: [0.0, 1.0],
            radius_range: [0.0, max_radius],
        }
    }

    /// Scales that make `focus` fill the circle. A non-root focus leaves a
    /// center hole of `center_hole` pixels for its ancestors.
    pub fn focused(focus: &Extent, center_hole: f64, max_radius: f64) -> Self {
        Self {
            theta_domain: [focus.x, focus.x + focus.dx],
            radius_domain: [focus.y, 1.0],
            radius_range: [if focus.y > 0.0 { center_hole } else { 0.0 }, max_radius],
        }
    }

    pub fn theta(&self, x: f64) -> f64 {
        linear(self.theta_domain, [0.0, TAU], x)
    }

    pub fn radius(&self, y: f64) -> f64 {
        linear(self.radius_domain, self.radius_range, y)
    }

    pub fn lerp(&self, other: &Scales, t: f64) -> Scales {
        Scales {
            theta_domain: lerp2(self.theta_domain, other.theta_domain, t),
            radius_domain: lerp2(self.radius_domain, other.radius_domain, t),
            radius_range: lerp2(self.radius_range, other.radius_range, t),
        }
    }

    pub fn arc(&self, extent: &Extent) -> ArcGeometry {
        ArcGeometry {
            start_angle: self.theta(extent.x).clamp(0.0, TAU),
            end_angle: self.theta(extent.x + extent.dx).clamp(0.0, TAU),
            inner_radius: self.radius(extent.y).max(0.0) + ARC_INSET,
            outer_radius: self.radius(extent.y + extent.dy).max(0.0) - ARC_INSET,
        }
    }
}

/// Annular sector; angles run clockwise from 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    pub start_angle: f64,
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

/// Three decimals, no trailing zeros, no negative zero.
fn num(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let mut s = format!("{rounded:.3}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

impl ArcGeometry {
    pub fn is_visible(&self) -> bool {
        self.end_angle > self.start_angle && self.outer_radius > self.inner_radius
    }

    /// SVG path data, centered on the origin. Empty when nothing is visible.
    pub fn path(&self) -> String {
        if !self.is_visible() {
            return String::new();
        }

        let (r0, r1) = (self.inner_radius, self.outer_radius);
        let mut d = String::new();

        if self.end_angle - self.start_angle >= TAU - 1e-6 {
            // full ring as two half circles per radius
            let _ = write!(
                d,
                "M0,{r1}A{r1},{r1} 0 1,1 0,-{r1}A{r1},{r1} 0 1,1 0,{r1}\
                 M0,{r0}A{r0},{r0} 0 1,0 0,-{r0}A{r0},{r0} 0 1,0 0,{r0}Z",
                r1 = num(r1),
                r0 = num(r0),
            );
            return d;
        }

        let a0 = self.start_angle - std::f64::consts::FRAC_PI_2;
        let a1 = self.end_angle - std::f64::consts::FRAC_PI_2;
        let large = if a1 - a0 > std::f64::consts::PI { 1 } else { 0 };
        let (c0, s0, c1, s1) = (a0.cos(), a0.sin(), a1.cos(), a1.sin());

        let _ = write!(
            d,
            "M{},{}A{r1},{r1} 0 {large},1 {},{}L{},{}A{r0},{r0} 0 {large},0 {},{}Z",
            num(r1 * c0),
            num(r1 * s0),
            num(r1 * c1),
            num(r1 * s1),
            num(r0 * c1),
            num(r0 * s1),
            num(r0 * c0),
            num(r0 * s0),
            r1 = num(r1),
            r0 = num(r0),
        );
        d
    }
}
