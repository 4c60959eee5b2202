//! Access token lookup: token file first, then `GITHUB_ACCESS_TOKEN`.

use std::path::Path;

use crate::config::TOKEN_ENV_VAR;
use crate::error::{AppError, Result};

pub fn resolve_token(token_file: &Path) -> Result<String> {
    resolve_token_from(token_file, std::env::var(TOKEN_ENV_VAR).ok())
}

fn resolve_token_from(token_file: &Path, env_value: Option<String>) -> Result<String> {
    if token_file.is_file() {
        let token = std::fs::read_to_string(token_file)?.trim().to_string();
        if !token.is_empty() {
            tracing::debug!("Using access token from {}", token_file.display());
            return Ok(token);
        }
        tracing::warn!("Token file {} is empty", token_file.display());
    }

    match env_value.map(|v| v.trim().to_string()) {
        Some(token) if !token.is_empty() => {
            tracing::debug!("Using access token from {}", TOKEN_ENV_VAR);
            Ok(token)
        }
        _ => Err(AppError::Authentication(format!(
            "no access token found in {} or {}",
            token_file.display(),
            TOKEN_ENV_VAR
        ))),
    }
}
