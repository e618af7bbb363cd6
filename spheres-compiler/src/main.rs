//! spheres-compile - standalone metadata compiler
//!
//! Scans the sphere directory, writes missing thumbnails and overwrites the
//! GeoJSON collection, then exits. The web server runs the same pipeline at
//! startup; this binary is for rebuilding without restarting it.

use anyhow::{Context, Result};
use clap::Parser;
use spheres_common::{build_info, ConfigOverrides, SiteConfig};
use spheres_compiler::{compile_all, CompilerConfig};
use tracing::info;

/// Command-line arguments for spheres-compile
#[derive(Parser, Debug)]
#[command(name = "spheres-compile")]
#[command(about = "Compile sphere metadata and thumbnails into a GeoJSON collection")]
#[command(version)]
struct Args {
    #[command(flatten)]
    overrides: ConfigOverrides,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = SiteConfig::resolve(&args.overrides).context("Failed to load configuration")?;
    spheres_common::logging::init_tracing(&config.log_level);
    config.source.log();

    info!(
        "{}",
        build_info::startup_banner("spheres-compile", env!("CARGO_PKG_VERSION"))
    );

    let summary = compile_all(&CompilerConfig::from(&config)).context("Sphere compilation failed")?;

    info!(
        "Done: {} spheres, {} new thumbnails",
        summary.records.len(),
        summary.thumbnails_created
    );

    Ok(())
}
