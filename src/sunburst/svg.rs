//! SVG output for a `Chart`.
//!
//! The chart group sits left of center and the legend to the right of it.
//! A running transition is baked in as a discrete SMIL animation of each
//! path's `d` attribute, sampled from `now` until the transition ends.
//! Markup lives in `templates/sunburst.svg`.

use std::time::Duration;

use askama::Template;
use reqwest::Url;

use crate::error::Result;
use crate::sunburst::color::hex;
use crate::sunburst::hierarchy::{NodeId, ROOT};
use crate::sunburst::legend::SWATCH_SIZE;
use crate::sunburst::renderer::Chart;

/// Frames sampled per zoom animation.
pub const ANIMATION_FRAMES: u32 = 24;

const CHART_SHIFT: f64 = 100.0;
const LEGEND_MARGIN: f64 = 200.0;
const LEGEND_TOP: f64 = 50.0;

#[derive(Template)]
#[template(path = "sunburst.svg", escape = "html")]
struct SunburstSvg<'a> {
    width: f64,
    height: f64,
    chart_x: f64,
    chart_y: f64,
    legend_x: f64,
    legend_y: f64,
    swatch: f64,
    arcs: Vec<ArcView>,
    animated: bool,
    duration: String,
    center_label: &'a str,
    legend: Vec<LegendRow<'a>>,
}

struct ArcView {
    zoomable: bool,
    href: String,
    depth: usize,
    d: String,
    fill: String,
    title: String,
    /// `;`-separated path data, one per animation frame.
    frames: String,
}

struct LegendRow<'a> {
    href: String,
    /// Repository page; opened in a new tab so the chart stays put.
    external: bool,
    rect_y: f64,
    y: f64,
    fill: String,
    label: &'a str,
}

fn focus_name(chart: &Chart, node: NodeId) -> &str {
    if node == ROOT {
        ""
    } else {
        &chart.hierarchy().node(node).name
    }
}

/// Query string that zooms from the chart's current focus into `node`.
/// The root is named by an empty `focus`.
pub fn focus_link(chart: &Chart, node: NodeId) -> String {
    let params = [
        ("focus", focus_name(chart, node)),
        ("from", focus_name(chart, chart.focus())),
    ];
    match Url::parse_with_params("http://localhost/", &params) {
        Ok(url) => format!("?{}", url.query().unwrap_or_default()),
        Err(_) => "#".to_string(),
    }
}

/// Path data of every arc at each animation frame, `now` first.
fn sampled_paths(chart: &Chart, now: Duration) -> Option<(Duration, Vec<Vec<String>>)> {
    let transition = chart.transition().filter(|t| !t.is_finished(now))?;
    let remaining = transition.ends_at() - now;

    let frames = ANIMATION_FRAMES as usize + 1;
    let mut per_node = vec![Vec::with_capacity(frames); chart.layout().len()];
    for step in 0..=ANIMATION_FRAMES {
        let at = now + remaining * step / ANIMATION_FRAMES;
        for arc in chart.frame(at) {
            per_node[arc.node].push(arc.path);
        }
    }
    Some((remaining, per_node))
}

/// Renders `chart` as seen at `now`.
///
/// `link` yields the href that zooms into a node; it is only asked about
/// nodes with children.
pub fn render_svg(
    chart: &Chart,
    now: Duration,
    link: impl Fn(NodeId) -> String,
) -> Result<String> {
    let size = chart.size();
    let hierarchy = chart.hierarchy();
    let animation = sampled_paths(chart, now);

    let arcs = chart
        .frame(now)
        .into_iter()
        .map(|arc| {
            let node = hierarchy.node(arc.node);
            let zoomable = !node.is_leaf();
            ArcView {
                zoomable,
                href: if zoomable { link(arc.node) } else { String::new() },
                depth: node.depth,
                d: arc.path,
                fill: arc.fill,
                title: format!("{} ({})", node.name, node.value),
                frames: animation
                    .as_ref()
                    .map(|(_, paths)| paths[arc.node].join(";"))
                    .unwrap_or_default(),
            }
        })
        .collect();

    let legend = chart
        .legend()
        .iter()
        .map(|entry| LegendRow {
            href: if entry.zoomable { link(entry.node) } else { entry.href.clone() },
            external: !entry.zoomable,
            rect_y: entry.y - SWATCH_SIZE,
            y: entry.y,
            fill: hex(entry.color),
            label: &entry.label,
        })
        .collect();

    let svg = SunburstSvg {
        width: size.width,
        height: size.height,
        chart_x: size.width / 2.0 - CHART_SHIFT,
        chart_y: size.height / 2.0,
        legend_x: size.width - LEGEND_MARGIN,
        legend_y: LEGEND_TOP,
        swatch: SWATCH_SIZE,
        arcs,
        animated: animation.is_some(),
        duration: animation
            .as_ref()
            .map(|(remaining, _)| format!("{:.3}s", remaining.as_secs_f64()))
            .unwrap_or_default(),
        center_label: chart.center_label(),
        legend,
    };
    Ok(svg.render()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sunburst::fixtures::go_rust_snapshot;
    use crate::sunburst::renderer::ChartSize;

    fn link(node: NodeId) -> String {
        format!("?focus={node}")
    }

    fn draw(chart: &Chart, now: Duration) -> String {
        render_svg(chart, now, link).unwrap()
    }

    #[test]
    fn names_are_escaped() {
        let mut snap = go_rust_snapshot();
        snap.insert(
            "<b>&Co".to_string(),
            vec![crate::models::RepoEntry {
                name: "o/\"quoted\"".to_string(),
                url: None,
                loc: 5,
            }],
        );
        let mut chart = Chart::new(&snap, ChartSize::default());
        let out = draw(&chart, Duration::ZERO);
        assert!(out.contains("&lt;b&gt;&amp;Co"));
        assert!(!out.contains("<b>"));

        let lang = chart.hierarchy().find_language("<b>&Co").unwrap();
        chart.jump_to(lang);
        let out = draw(&chart, Duration::ZERO);
        assert!(out.contains(">&lt;b&gt;&amp;Co</text>"));
        assert!(!out.contains("\"quoted\""));
    }

    #[test]
    fn settled_chart_has_no_animation() {
        let chart = Chart::new(&go_rust_snapshot(), ChartSize::default());
        let svg = draw(&chart, Duration::ZERO);

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"transform="translate(300,250)""#));
        assert!(svg.contains(r#"transform="translate(600,50)""#));
        assert!(svg.contains(
            r#"<text class="stat-center" text-anchor="middle" dy=".35em">All Languages</text>"#
        ));
        assert!(!svg.contains("<animate"));
        assert_eq!(svg.matches("<path").count(), chart.hierarchy().len());
    }

    #[test]
    fn legend_rows_link_to_zoom_or_repository() {
        let mut chart = Chart::new(&go_rust_snapshot(), ChartSize::default());
        let svg = draw(&chart, Duration::ZERO);
        let go = chart.hierarchy().find_language("Go").unwrap();
        let row = format!(r#"<a href="?focus={go}"><rect x="-20" y="-15" width="15" height="15""#);
        assert!(svg.contains(&row));
        assert!(svg.contains(r#"<text y="30">Rust</text>"#));

        chart.jump_to(go);
        let svg = draw(&chart, Duration::ZERO);
        assert!(svg.contains(r#"<a href="u1" target="_blank"><rect"#));
        assert!(svg.contains(r#"<text y="0">x</text>"#));
    }

    #[test]
    fn leaves_are_not_links() {
        let chart = Chart::new(&go_rust_snapshot(), ChartSize::default());
        let svg = draw(&chart, Duration::ZERO);
        let leaf = chart.hierarchy().node(1).children[0];
        assert!(!svg.contains(&format!(r#"href="?focus={leaf}""#)));
        assert!(svg.contains(&format!(r#"href="?focus={ROOT}""#)));
    }

    #[test]
    fn running_zoom_is_animated() {
        let mut chart = Chart::new(&go_rust_snapshot(), ChartSize::default());
        let go = chart.hierarchy().find_language("Go").unwrap();
        chart.click(go, Duration::ZERO);

        let svg = draw(&chart, Duration::ZERO);
        assert_eq!(svg.matches("<animate").count(), chart.hierarchy().len());
        assert!(svg.contains(r#"dur="0.750s""#));
        assert!(svg.contains(">Go</text>"));

        let settled = draw(&chart, Duration::from_secs(1));
        assert!(!settled.contains("<animate"));
    }

    #[test]
    fn focus_links_are_encoded() {
        let mut snap = go_rust_snapshot();
        snap.insert("C++".to_string(), vec![]);
        let mut chart = Chart::new(&snap, ChartSize::default());
        let cpp = chart.hierarchy().find_language("C++").unwrap();
        let go = chart.hierarchy().find_language("Go").unwrap();

        assert_eq!(focus_link(&chart, cpp), "?focus=C%2B%2B&from=");
        chart.jump_to(go);
        assert_eq!(focus_link(&chart, ROOT), "?focus=&from=Go");
    }
}
