//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use spheres_compiler::record::SphereCollection;
use tracing::debug;

use crate::AppState;

/// Liveness plus the size of the collection currently on disk
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    /// `None` when the collection is missing or unreadable
    pub spheres: Option<usize>,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        module: "spheres-web",
        version: env!("CARGO_PKG_VERSION"),
        spheres: collection_size(&state).await,
    })
}

async fn collection_size(state: &AppState) -> Option<usize> {
    let path = state.collection_path.as_path();
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("Collection {} not readable: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_slice::<SphereCollection>(&bytes) {
        Ok(collection) => Some(collection.records.len()),
        Err(e) => {
            debug!("Collection {} not parseable: {}", path.display(), e);
            None
        }
    }
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
