//! Configuration loading and directory conventions
//!
//! Settings resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (bound to the same flag)
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file is not fatal: defaults apply, and [`ConfigSource::log`]
//! warns about it once the binary has installed its subscriber.

use crate::{Error, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Config file name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "spheres.toml";

/// Default static asset directory (relative to the working directory)
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Sphere directory name below the static directory
pub const SPHERE_DIR_NAME: &str = "spheres";

/// Thumbnail directory name, created as a sibling of the sphere directory
pub const THUMBNAIL_DIR_NAME: &str = "sphere-thumbnails";

/// Output collection path below the static directory
pub const OUTPUT_RELATIVE_PATH: &str = "shapes/spheres.geojson";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 80;

/// Bootstrap configuration loaded from TOML
///
/// Every field is optional; anything left out falls back to the compiled
/// defaults documented on [`SiteConfig`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub static_dir: Option<PathBuf>,

    #[serde(default)]
    pub sphere_dir: Option<PathBuf>,

    #[serde(default)]
    pub thumbnail_dir: Option<PathBuf>,

    #[serde(default)]
    pub output_path: Option<PathBuf>,

    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    /// Run the compiler before the web server starts listening
    #[serde(default)]
    pub compile_on_startup: Option<bool>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Command-line configuration overrides
///
/// Flattened into each binary's argument parser. Every flag doubles as an
/// environment variable through clap's `env` binding.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Path to a TOML configuration file
    #[arg(long = "config", value_name = "FILE", env = "SPHERES_CONFIG")]
    pub config_path: Option<PathBuf>,

    /// Static asset directory served under /static
    #[arg(long, value_name = "DIR", env = "SPHERES_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Directory scanned for Sph_* source images
    #[arg(long, value_name = "DIR", env = "SPHERES_SPHERE_DIR")]
    pub sphere_dir: Option<PathBuf>,

    /// Directory thumbnails are written to
    #[arg(long, value_name = "DIR", env = "SPHERES_THUMBNAIL_DIR")]
    pub thumbnail_dir: Option<PathBuf>,

    /// Destination of the compiled GeoJSON collection
    #[arg(long = "output", value_name = "FILE", env = "SPHERES_OUTPUT")]
    pub output_path: Option<PathBuf>,

    /// Address the web server binds to
    #[arg(long, env = "SPHERES_HOST")]
    pub host: Option<String>,

    /// Port the web server listens on
    #[arg(short, long, env = "SPHERES_PORT")]
    pub port: Option<u16>,
}

/// Where the TOML layer of a [`SiteConfig`] came from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named with `--config` or `SPHERES_CONFIG`
    Explicit(PathBuf),
    /// Found at one of the implicit locations
    Discovered(PathBuf),
    /// No file; compiled defaults only
    #[default]
    Defaults,
}

impl ConfigSource {
    /// Path of the file that was loaded, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Explicit(path) | ConfigSource::Discovered(path) => Some(path),
            ConfigSource::Defaults => None,
        }
    }

    /// Report the source
    ///
    /// Resolution runs before the log level is known, so the binaries call
    /// this right after `init_tracing`.
    pub fn log(&self) {
        match self.path() {
            Some(path) => info!("Loaded TOML configuration from {}", path.display()),
            None => warn!("No config file found, using compiled defaults"),
        }
    }
}

/// Fully resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    /// Default: `static`
    pub static_dir: PathBuf,
    /// Default: `<static_dir>/spheres`
    pub sphere_dir: PathBuf,
    /// Default: `<parent of sphere_dir>/sphere-thumbnails`
    pub thumbnail_dir: PathBuf,
    /// Default: `<static_dir>/shapes/spheres.geojson`
    pub output_path: PathBuf,
    /// Default: `0.0.0.0`
    pub host: String,
    /// Default: `80`
    pub port: u16,
    /// Default: `true`
    pub compile_on_startup: bool,
    /// Default: `info`
    pub log_level: String,
    /// Which TOML file, if any, contributed
    pub source: ConfigSource,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::merge(TomlConfig::default(), &ConfigOverrides::default())
    }
}

impl SiteConfig {
    /// Resolve configuration from CLI/env overrides and the TOML file
    ///
    /// An explicitly named config file must exist. The implicit locations
    /// are optional.
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self> {
        let (toml_config, source) = match &overrides.config_path {
            Some(path) => (load_toml_config(path)?, ConfigSource::Explicit(path.clone())),
            None => match locate_config_file() {
                Some(path) => (load_toml_config(&path)?, ConfigSource::Discovered(path)),
                None => (TomlConfig::default(), ConfigSource::Defaults),
            },
        };

        Ok(Self {
            source,
            ..Self::merge(toml_config, overrides)
        })
    }

    /// Apply overrides on top of a TOML config, then fill in defaults
    ///
    /// Derived directories follow whichever base directory won, so
    /// overriding only `static_dir` moves the sphere, thumbnail and output
    /// locations with it.
    pub fn merge(toml_config: TomlConfig, overrides: &ConfigOverrides) -> Self {
        let static_dir = overrides
            .static_dir
            .clone()
            .or(toml_config.static_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        let sphere_dir = overrides
            .sphere_dir
            .clone()
            .or(toml_config.sphere_dir)
            .unwrap_or_else(|| static_dir.join(SPHERE_DIR_NAME));

        let thumbnail_dir = overrides
            .thumbnail_dir
            .clone()
            .or(toml_config.thumbnail_dir)
            .unwrap_or_else(|| default_thumbnail_dir(&sphere_dir));

        let output_path = overrides
            .output_path
            .clone()
            .or(toml_config.output_path)
            .unwrap_or_else(|| static_dir.join(OUTPUT_RELATIVE_PATH));

        Self {
            static_dir,
            sphere_dir,
            thumbnail_dir,
            output_path,
            host: overrides
                .host
                .clone()
                .or(toml_config.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(toml_config.port).unwrap_or(DEFAULT_PORT),
            compile_on_startup: toml_config.compile_on_startup.unwrap_or(true),
            log_level: toml_config.logging.level,
            source: ConfigSource::Defaults,
        }
    }

    /// Socket address the web server binds to
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| Error::InvalidInput(format!("Bad listen address {}:{}: {}", self.host, self.port, e)))
    }
}

/// Thumbnail directory convention: a sibling of the sphere directory
pub fn default_thumbnail_dir(sphere_dir: &Path) -> PathBuf {
    sphere_dir
        .parent()
        .map(|parent| parent.join(THUMBNAIL_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(THUMBNAIL_DIR_NAME))
}

/// Find an implicit config file
///
/// Tries `./spheres.toml` first, then `<config_dir>/spheres/config.toml`.
pub fn locate_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|d| d.join("spheres").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Read and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config file {}: {}", path.display(), e)))?;

    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;

    Ok(config)
}
