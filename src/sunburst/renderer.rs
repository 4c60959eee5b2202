//! Sunburst renderer state machine.
//!
//! `Unloaded -> Loading -> Rendered | Failed`. Once rendered, clicks on nodes
//! with children move the focus and start a zoom transition; clicks on
//! leaves do nothing.
//!
//! A click that lands while a transition is still running cancels it and
//! restarts from the scales on screen at that instant, so the picture never
//! jumps.

use std::time::Duration;

use crate::error::Result;
use crate::models::LanguageSnapshot;
use crate::sunburst::color::{assign_colors, hex, Color};
use crate::sunburst::hierarchy::{Hierarchy, NodeId, ROOT};
use crate::sunburst::legend::{legend_for, LegendEntry};
use crate::sunburst::partition::{partition, Extent};
use crate::sunburst::scale::Scales;
use crate::sunburst::source::SnapshotSource;
use crate::sunburst::transition::Transition;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSize {
    pub width: f64,
    pub height: f64,
    pub center_hole: f64,
}

impl Default for ChartSize {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
            center_hole: 60.0,
        }
    }
}

impl ChartSize {
    pub fn max_radius(&self) -> f64 {
        self.width.min(self.height) / 2.0
    }
}

/// One drawn arc.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcFrame {
    pub node: NodeId,
    pub path: String,
    pub fill: String,
}

#[derive(Debug, Clone)]
pub struct Chart {
    size: ChartSize,
    hierarchy: Hierarchy,
    layout: Vec<Extent>,
    colors: Vec<Color>,
    focus: NodeId,
    /// Scales once any running transition has finished.
    target: Scales,
    transition: Option<Transition>,
    legend: Vec<LegendEntry>,
}

impl Chart {
    pub fn new(snapshot: &LanguageSnapshot, size: ChartSize) -> Self {
        let hierarchy = Hierarchy::from_snapshot(snapshot);
        let layout = partition(&hierarchy);
        let colors = assign_colors(&hierarchy);
        let legend = legend_for(&hierarchy, &colors, ROOT);

        Self {
            size,
            hierarchy,
            layout,
            colors,
            focus: ROOT,
            target: Scales::full(size.max_radius()),
            transition: None,
            legend,
        }
    }

    pub fn size(&self) -> ChartSize {
        self.size
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn layout(&self) -> &[Extent] {
        &self.layout
    }

    pub fn focus(&self) -> NodeId {
        self.focus
    }

    pub fn center_label(&self) -> &str {
        &self.hierarchy.node(self.focus).name
    }

    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    pub fn is_animating(&self, now: Duration) -> bool {
        self.transition.as_ref().is_some_and(|t| !t.is_finished(now))
    }

    fn focus_scales(&self, node: NodeId) -> Scales {
        Scales::focused(&self.layout[node], self.size.center_hole, self.size.max_radius())
    }

    pub fn scales_at(&self, now: Duration) -> Scales {
        match &self.transition {
            Some(t) if !t.is_finished(now) => t.scales_at(now),
            _ => self.target,
        }
    }

    /// Arc or legend click. Returns whether the focus changed hands.
    pub fn click(&mut self, node: NodeId, now: Duration) -> bool {
        match self.hierarchy.get(node) {
            Some(n) if !n.is_leaf() => {}
            _ => return false,
        }

        let from = self.scales_at(now);
        let to = self.focus_scales(node);
        if self.is_animating(now) {
            tracing::debug!("Restarting zoom towards {}", self.hierarchy.node(node).name);
        }

        self.transition = Some(Transition::new(from, to, now));
        self.target = to;
        self.focus = node;
        self.legend = legend_for(&self.hierarchy, &self.colors, node);
        true
    }

    /// Moves the focus without animating. Leaves are ignored.
    pub fn jump_to(&mut self, node: NodeId) -> bool {
        match self.hierarchy.get(node) {
            Some(n) if !n.is_leaf() => {}
            _ => return false,
        }
        self.transition = None;
        self.target = self.focus_scales(node);
        self.focus = node;
        self.legend = legend_for(&self.hierarchy, &self.colors, node);
        true
    }

    /// Every arc as drawn at `now`. Node 0 always gets the final geometry.
    pub fn frame(&self, now: Duration) -> Vec<ArcFrame> {
        let scales = self.scales_at(now);
        self.layout
            .iter()
            .enumerate()
            .map(|(id, extent)| {
                let arc = if id == ROOT {
                    self.target.arc(extent)
                } else {
                    scales.arc(extent)
                };
                ArcFrame {
                    node: id,
                    path: arc.path(),
                    fill: hex(self.colors[id]),
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub enum RenderState {
    Unloaded,
    Loading,
    Rendered(Box<Chart>),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Renderer {
    size: ChartSize,
    state: RenderState,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(ChartSize::default())
    }
}

impl Renderer {
    pub fn new(size: ChartSize) -> Self {
        Self {
            size,
            state: RenderState::Unloaded,
        }
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn chart(&self) -> Option<&Chart> {
        match &self.state {
            RenderState::Rendered(chart) => Some(&**chart),
            _ => None,
        }
    }

    pub fn chart_mut(&mut self) -> Option<&mut Chart> {
        match &mut self.state {
            RenderState::Rendered(chart) => Some(&mut **chart),
            _ => None,
        }
    }

    pub fn begin_loading(&mut self) {
        self.state = RenderState::Loading;
    }

    pub fn finish_loading(&mut self, result: Result<LanguageSnapshot>) {
        self.state = match result {
            Ok(snapshot) => RenderState::Rendered(Box::new(Chart::new(&snapshot, self.size))),
            Err(e) => {
                tracing::warn!("Snapshot fetch failed: {}", e);
                RenderState::Failed(e.to_string())
            }
        };
    }

    /// Fetches the snapshot and draws the chart, or records the failure.
    pub async fn mount<S: SnapshotSource + ?Sized>(&mut self, source: &S) {
        self.begin_loading();
        let result = source.fetch().await;
        self.finish_loading(result);
    }
}
