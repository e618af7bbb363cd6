//! spheres-web library - gallery HTTP server
//!
//! Three page routes (map, sphere viewer, favicon), the embedded page
//! scripts, and the static mount the pages load images and the GeoJSON
//! collection from.

use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Root of the static assets (favicon, spheres, thumbnails, scripts)
    pub static_dir: Arc<PathBuf>,
    /// Compiled GeoJSON collection, read by `/health`
    pub collection_path: Arc<PathBuf>,
}

impl AppState {
    /// Create new application state
    pub fn new(static_dir: impl Into<PathBuf>, collection_path: impl Into<PathBuf>) -> Self {
        Self {
            static_dir: Arc::new(static_dir.into()),
            collection_path: Arc::new(collection_path.into()),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let assets = ServeDir::new(state.static_dir.as_path());

    Router::new()
        .route("/", get(api::serve_index))
        .route("/spheres/:sphere", get(api::serve_sphere))
        .route("/favicon.ico", get(api::serve_favicon))
        .route("/assets/index.js", get(api::serve_index_js))
        .route("/assets/sphere.js", get(api::serve_sphere_js))
        .merge(api::health_routes())
        .nest_service("/static", assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
