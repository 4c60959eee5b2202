//! Embedded static files.
//!
//! GET /assets/{*path}
//!
//! Serves files compiled in from `assets/`, with the content type guessed
//! from the extension.

use axum::{
    extract::Path,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use rust_embed::Embed;

use crate::error::{AppError, Result};

#[derive(Embed)]
#[folder = "assets/"]
struct Assets;

pub fn routes() -> Router {
    Router::new().route("/assets/{*path}", get(serve_asset))
}

async fn serve_asset(Path(path): Path<String>) -> Result<Response> {
    let content = Assets::get(&path).ok_or_else(|| AppError::NotFound(format!("asset {path}")))?;
    let mime = mime_guess::from_path(&path).first_or_octet_stream();
    Ok((
        [(header::CONTENT_TYPE, mime.as_ref().to_string())],
        content.data.into_owned(),
    )
        .into_response())
}
