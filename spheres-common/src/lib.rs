//! # Spheres Common Library
//!
//! Shared code for the sphere compiler and the gallery web server:
//! - Error type
//! - Configuration loading and directory conventions
//! - Tracing subscriber setup
//! - Build identification

pub mod build_info;
pub mod config;
pub mod error;
pub mod logging;

pub use config::{ConfigOverrides, ConfigSource, SiteConfig};
pub use error::{Error, Result};
