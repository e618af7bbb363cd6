//! HTTP handlers for spheres-web

pub mod assets;
pub mod favicon;
pub mod health;
pub mod pages;

pub use assets::{serve_index_js, serve_sphere_js};
pub use favicon::serve_favicon;
pub use health::health_routes;
pub use pages::{serve_index, serve_sphere};
