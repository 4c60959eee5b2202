//! langs-stat - lines of code per language across a GitHub account
//!
//! # Usage
//! ```bash
//! langs-stat collect                      # Write langs_stat.json once
//! langs-stat serve --open                 # Serve the chart on :3001
//! langs-stat render --url http://host/stats --focus Rust > rust.svg
//! ```

mod config;
mod error;
mod github;
mod models;
mod routes;
mod stats;
mod sunburst;
mod templates;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use clap::{Parser, Subcommand};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{CollectorSettings, DEFAULT_SNAPSHOT_PATH};
use stats::{Collector, SnapshotStore};
use sunburst::{render_svg, HttpSnapshotSource, RenderState, Renderer};

/// Language statistics for a GitHub account, with a zoomable sunburst chart
#[derive(Parser)]
#[command(name = "langs-stat")]
#[command(about = "Collects per-language LOC from GitHub and charts it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Snapshot file written by the collector and served by the server
    #[arg(
        long,
        global = true,
        env = "LANGS_STAT_SNAPSHOT",
        default_value = DEFAULT_SNAPSHOT_PATH
    )]
    snapshot: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the snapshot server
    Serve {
        /// Port to run the server on
        #[arg(short, long, default_value = "3001")]
        port: u16,

        /// Open browser automatically after starting
        #[arg(short, long)]
        open: bool,

        #[command(flatten)]
        settings: CollectorSettings,
    },
    /// Collect statistics once and write the snapshot
    Collect {
        #[command(flatten)]
        settings: CollectorSettings,
    },
    /// Render the chart of a served snapshot to SVG
    Render {
        /// Page the chart would be shown on; stat.json is fetched next to it
        #[arg(long)]
        url: String,

        /// Language to zoom into
        #[arg(long)]
        focus: Option<String>,

        /// Write the SVG here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn collect(snapshot: PathBuf, settings: CollectorSettings) -> anyhow::Result<()> {
    let collector = Collector::from_settings(&settings)?;
    let summary = collector
        .run(&snapshot)
        .await
        .with_context(|| format!("collection failed, {} left untouched", snapshot.display()))?;
    println!("{summary}");
    Ok(())
}

async fn render(
    url: String,
    focus: Option<String>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let source = HttpSnapshotSource::for_page(&url)?;
    let mut renderer = Renderer::default();
    renderer.mount(&source).await;

    if let RenderState::Failed(e) = renderer.state() {
        anyhow::bail!("could not load {}: {}", source.url(), e);
    }
    if let Some(name) = focus.as_deref() {
        let chart = renderer.chart_mut().context("chart was not rendered")?;
        let node = chart
            .hierarchy()
            .find_language(name)
            .with_context(|| format!("no language named {name}"))?;
        chart.jump_to(node);
    }

    let chart = renderer.chart().context("chart was not rendered")?;
    let svg = render_svg(chart, Duration::ZERO, |node| {
        format!("{url}{}", sunburst::svg::focus_link(chart, node))
    })?;
    match output {
        Some(path) => {
            std::fs::write(&path, svg).with_context(|| format!("writing {}", path.display()))?
        }
        None => print!("{svg}"),
    }
    Ok(())
}

async fn serve(
    snapshot: PathBuf,
    port: u16,
    open: bool,
    settings: CollectorSettings,
) -> anyhow::Result<()> {
    let collector = Collector::from_settings(&settings)?;
    let store = Arc::new(SnapshotStore::new(snapshot.clone(), collector));

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::create_router(store))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("127.0.0.1:{port}");
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to port {}: {}", port, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    let url = format!("http://127.0.0.1:{port}/stats");
    println!();
    println!("  Snapshot: {}", snapshot.display());
    println!("  Chart:    {}", url);
    println!("  Refresh:  http://127.0.0.1:{port}/stats/update");
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    if open {
        if let Err(e) = open::that(&url) {
            eprintln!("  Warning: Could not open browser: {}", e);
        }
    }

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
        println!("\n  Shutting down...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Collect { settings } => {
            init_tracing("info");
            collect(cli.snapshot, settings).await
        }
        Commands::Serve { port, open, settings } => {
            init_tracing("warn");
            serve(cli.snapshot, port, open, settings).await
        }
        Commands::Render { url, focus, output } => {
            init_tracing("warn");
            render(url, focus, output).await
        }
    }
}
