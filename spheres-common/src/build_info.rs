//! Build identification stamped by `build.rs`

/// Short commit hash, suffixed `-dirty` for uncommitted tracked changes
pub const GIT_REVISION: &str = env!("SPHERES_GIT_REVISION");

/// UTC build time
pub const BUILT_AT: &str = env!("SPHERES_BUILT_AT");

/// Cargo profile (`debug` or `release`)
pub const PROFILE: &str = env!("SPHERES_PROFILE");

/// First log line of each binary
pub fn startup_banner(binary: &str, version: &str) -> String {
    format!("Starting {binary} v{version} [{GIT_REVISION}] built {BUILT_AT} ({PROFILE})")
}
