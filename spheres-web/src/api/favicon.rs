//! Favicon route

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use std::io::ErrorKind;

use crate::error::{WebError, WebResult};
use crate::AppState;

pub const FAVICON_FILE: &str = "favicon.ico";
pub const FAVICON_MIME: &str = "image/vnd.microsoft.icon";

/// GET /favicon.ico
///
/// Reads `<static_dir>/favicon.ico` on each request.
pub async fn serve_favicon(State(state): State<AppState>) -> WebResult<Response> {
    let path = state.static_dir.join(FAVICON_FILE);

    let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => WebError::NotFound(FAVICON_FILE.to_string()),
        _ => WebError::Io(e),
    })?;

    Ok(([(header::CONTENT_TYPE, FAVICON_MIME)], bytes).into_response())
}
