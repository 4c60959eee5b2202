//! Runtime settings and fixed constants.
//!
//! Settings come from the command line with environment fallbacks; the
//! collector block is flattened into both `collect` and `serve`.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

/// A snapshot older than this is eligible for refresh.
pub const STALENESS_TTL: Duration = Duration::from_secs(60 * 60 * 24);

pub const DEFAULT_SNAPSHOT_PATH: &str = "langs_stat.json";
pub const DEFAULT_TOKEN_FILE: &str = "github_access_token";
pub const TOKEN_ENV_VAR: &str = "GITHUB_ACCESS_TOKEN";
pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone, Args)]
pub struct CollectorSettings {
    /// File holding the GitHub access token (checked before GITHUB_ACCESS_TOKEN)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_TOKEN_FILE)]
    pub token_file: PathBuf,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Maximum number of language requests in flight
    #[arg(long, default_value_t = 8)]
    pub concurrency: usize,

    /// Leave repository URLs out of the snapshot
    #[arg(long)]
    pub no_urls: bool,
}

impl CollectorSettings {
    pub fn retain_urls(&self) -> bool {
        !self.no_urls
    }
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
            api_url: DEFAULT_API_URL.to_string(),
            concurrency: 8,
            no_urls: false,
        }
    }
}
