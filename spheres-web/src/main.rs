//! spheres-web - photo-sphere gallery server
//!
//! Compiles the sphere collection, then serves the map page, the viewer
//! pages and the static assets. A failed compile stops startup.

use anyhow::{Context, Result};
use clap::Parser;
use spheres_common::{build_info, ConfigOverrides, SiteConfig};
use spheres_compiler::{compile_all, CompilerConfig};
use spheres_web::{build_router, AppState};
use tokio::signal;
use tracing::info;

/// Command-line arguments for spheres-web
#[derive(Parser, Debug)]
#[command(name = "spheres-web")]
#[command(about = "Photo-sphere gallery web server")]
#[command(version)]
struct Args {
    #[command(flatten)]
    overrides: ConfigOverrides,

    /// Serve without recompiling the collection first
    #[arg(long)]
    skip_compile: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = SiteConfig::resolve(&args.overrides).context("Failed to load configuration")?;
    spheres_common::logging::init_tracing(&config.log_level);
    config.source.log();

    // Build identification first, before the compile pass
    info!(
        "{}",
        build_info::startup_banner("spheres-web", env!("CARGO_PKG_VERSION"))
    );
    info!("Static directory: {}", config.static_dir.display());

    if config.compile_on_startup && !args.skip_compile {
        let compiler_config = CompilerConfig::from(&config);
        let summary = tokio::task::spawn_blocking(move || compile_all(&compiler_config))
            .await
            .context("Compile task panicked")?
            .context("Sphere compilation failed")?;
        info!("✓ Compiled {} spheres", summary.records.len());
    } else {
        info!("Skipping compile; serving existing collection");
    }

    let app = build_router(AppState::new(
        config.static_dir.clone(),
        config.output_path.clone(),
    ));

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("spheres-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
