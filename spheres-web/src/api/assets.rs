//! Front-end scripts compiled into the binary

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

const INDEX_JS: &str = include_str!("../../assets/index.js");
const SPHERE_JS: &str = include_str!("../../assets/sphere.js");

const JAVASCRIPT_MIME: &str = "application/javascript";

fn javascript(body: &'static str) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, JAVASCRIPT_MIME)], body).into_response()
}

/// GET /assets/index.js
///
/// Map page script (`setup_map`)
pub async fn serve_index_js() -> Response {
    javascript(INDEX_JS)
}

/// GET /assets/sphere.js
///
/// Viewer page script (`show_sphere`)
pub async fn serve_sphere_js() -> Response {
    javascript(SPHERE_JS)
}
