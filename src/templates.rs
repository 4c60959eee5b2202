//! Server-rendered pages. Markup lives in `templates/`.

use askama::Template;

/// Chart page; `svg` is trusted markup from `sunburst::render_svg`.
#[derive(Template)]
#[template(path = "stats.html")]
pub struct StatsTemplate {
    pub title: String,
    pub svg: String,
}

/// Shown while no snapshot has been collected.
#[derive(Template)]
#[template(path = "empty.html")]
pub struct EmptyTemplate {
    pub title: String,
}

impl StatsTemplate {
    pub fn new(focus: &str, svg: String) -> Self {
        Self {
            title: format!("Languages: {focus}"),
            svg,
        }
    }
}

impl Default for EmptyTemplate {
    fn default() -> Self {
        Self {
            title: "Languages".to_string(),
        }
    }
}
