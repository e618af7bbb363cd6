//! Sphere source discovery
//!
//! Lists the sphere directory one level deep for `Sph_*` files. Paths
//! containing any exclusion substring are skipped; these are intermediate
//! artifacts (`_original` backups written by photo editors, stray
//! thumbnails) rather than spheres.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::filename::SPHERE_PREFIX;

/// Substrings that exclude a path anywhere they appear
pub const EXCLUDED_SUBSTRINGS: &[&str] = &["_original", "thumbnail"];

/// Source scanner errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Specified path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Directory listing failed
    #[error("Cannot read directory {0}: {1}")]
    ReadDir(PathBuf, String),
}

/// Sphere source scanner
pub struct SphereScanner {
    prefix: String,
    excluded: Vec<String>,
}

impl SphereScanner {
    /// Scanner for `Sph_*` with the standard exclusions
    pub fn new() -> Self {
        Self {
            prefix: SPHERE_PREFIX.to_string(),
            excluded: EXCLUDED_SUBSTRINGS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Scan a directory (non-recursive) for sphere source files
    ///
    /// Order is directory enumeration order.
    pub fn scan(&self, sphere_dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
        if !sphere_dir.exists() {
            return Err(ScanError::PathNotFound(sphere_dir.to_path_buf()));
        }

        if !sphere_dir.is_dir() {
            return Err(ScanError::NotADirectory(sphere_dir.to_path_buf()));
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(sphere_dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| ScanError::ReadDir(sphere_dir.to_path_buf(), e.to_string()))?;

            // Follow symlinked files, but not directories (depth is capped anyway)
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }

            if !entry.file_name().to_string_lossy().starts_with(&self.prefix) {
                continue;
            }

            if self.is_excluded(entry.path()) {
                tracing::debug!(file = %entry.path().display(), "Excluded from compilation");
                continue;
            }

            files.push(entry.into_path());
        }

        tracing::debug!("{} sphere sources found in {}", files.len(), sphere_dir.display());

        Ok(files)
    }

    /// Whether the full path string contains an exclusion substring
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.excluded.iter().any(|pattern| path_str.contains(pattern.as_str()))
    }
}

impl Default for SphereScanner {
    fn default() -> Self {
        Self::new()
    }
}
