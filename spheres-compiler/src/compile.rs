//! Compilation pipeline
//!
//! One synchronous pass: scan the sphere directory, turn each source into a
//! [`SphereRecord`] (writing its thumbnail if missing), then overwrite the
//! GeoJSON collection. The first failing file aborts the run.

use spheres_common::SiteConfig;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{CompileError, CompileResult};
use crate::filename::{derive_label, parse_date, parse_sphere_name, FilenameError};
use crate::metadata::read_metadata;
use crate::record::{SphereCollection, SphereRecord};
use crate::scanner::SphereScanner;
use crate::thumbnail::{ensure_thumbnail, thumbnail_path, ThumbnailOutcome};

/// Layer name used when the output path has no stem
const DEFAULT_LAYER_NAME: &str = "spheres";

/// Paths the compiler reads from and writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Directory scanned for `Sph_*` sources
    pub sphere_dir: PathBuf,
    /// Directory thumbnails are written to
    pub thumbnail_dir: PathBuf,
    /// GeoJSON collection destination
    pub output_path: PathBuf,
}

impl From<&SiteConfig> for CompilerConfig {
    fn from(config: &SiteConfig) -> Self {
        Self {
            sphere_dir: config.sphere_dir.clone(),
            thumbnail_dir: config.thumbnail_dir.clone(),
            output_path: config.output_path.clone(),
        }
    }
}

/// One processed source file
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedSphere {
    pub record: SphereRecord,
    pub thumbnail: ThumbnailOutcome,
}

/// Outcome of a full compile run
#[derive(Debug, Clone, PartialEq)]
pub struct CompileSummary {
    /// Records in enumeration order, as written
    pub records: Vec<SphereRecord>,
    pub thumbnails_created: usize,
    pub thumbnails_skipped: usize,
    pub output_path: PathBuf,
}

/// Build the record for one sphere source
///
/// The filename is validated before the file is opened, so a malformed
/// name fails without any I/O. The author is the only field allowed to
/// fall back to a default.
pub fn process_file(source: &Path, thumbnail_dir: &Path) -> CompileResult<ProcessedSphere> {
    let (Some(filename), Some(stem)) = (
        source.file_name().and_then(|n| n.to_str()),
        source.file_stem().and_then(|s| s.to_str()),
    ) else {
        return Err(CompileError::NonUtf8Name(source.to_path_buf()));
    };

    let filename_error = |source_error: FilenameError| CompileError::Filename {
        path: source.to_path_buf(),
        source: source_error,
    };
    let name = parse_sphere_name(stem).map_err(filename_error)?;
    let date = parse_date(name.date).map_err(filename_error)?;
    let label = derive_label(name.label);

    let metadata = read_metadata(source).map_err(|e| CompileError::Metadata {
        path: source.to_path_buf(),
        source: e,
    })?;

    let thumbnail_dest = thumbnail_path(thumbnail_dir, source);
    let thumbnail = ensure_thumbnail(source, &thumbnail_dest).map_err(|e| CompileError::Thumbnail {
        path: source.to_path_buf(),
        source: e,
    })?;

    Ok(ProcessedSphere {
        record: SphereRecord {
            filename: filename.to_string(),
            thumbnail: thumbnail_dest.to_string_lossy().replace('\\', "/"),
            author: metadata.author,
            label,
            date,
            longitude: metadata.longitude,
            latitude: metadata.latitude,
        },
        thumbnail,
    })
}

/// Compile every sphere source into the collection file
pub fn compile_all(config: &CompilerConfig) -> CompileResult<CompileSummary> {
    info!(
        "Compiling spheres from {} (thumbnails: {})",
        config.sphere_dir.display(),
        config.thumbnail_dir.display()
    );

    let sources = SphereScanner::new().scan(&config.sphere_dir)?;

    let mut records = Vec::with_capacity(sources.len());
    let mut thumbnails_created = 0;
    let mut thumbnails_skipped = 0;

    for source in &sources {
        let processed = process_file(source, &config.thumbnail_dir)?;
        match processed.thumbnail {
            ThumbnailOutcome::Created => thumbnails_created += 1,
            ThumbnailOutcome::Skipped => thumbnails_skipped += 1,
        }
        records.push(processed.record);
    }

    write_collection(&config.output_path, &records)?;

    info!(
        "Wrote {} spheres to {} ({} thumbnails created, {} already present)",
        records.len(),
        config.output_path.display(),
        thumbnails_created,
        thumbnails_skipped
    );
    log_by_date(&records);

    Ok(CompileSummary {
        records,
        thumbnails_created,
        thumbnails_skipped,
        output_path: config.output_path.clone(),
    })
}

/// Serialize records as GeoJSON, replacing any existing file
///
/// Writes a sibling `.tmp` file first and renames it over the target, so
/// readers never observe a half-written collection.
pub fn write_collection(output_path: &Path, records: &[SphereRecord]) -> CompileResult<()> {
    let write_error = |source: std::io::Error| CompileError::Write {
        path: output_path.to_path_buf(),
        source,
    };

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    let layer_name = output_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| DEFAULT_LAYER_NAME.to_string());
    let collection = SphereCollection::new(layer_name, records);

    let json = serde_json::to_vec_pretty(&collection).map_err(|source| CompileError::Serialize {
        path: output_path.to_path_buf(),
        source,
    })?;

    let mut temp_name = output_path.as_os_str().to_os_string();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    let mut file = fs::File::create(&temp_path).map_err(write_error)?;
    file.write_all(&json).map_err(write_error)?;
    file.sync_all().map_err(write_error)?;
    drop(file);

    fs::rename(&temp_path, output_path).map_err(write_error)?;
    Ok(())
}

/// Read a collection file back
pub fn read_collection(path: &Path) -> CompileResult<SphereCollection> {
    let bytes = fs::read(path).map_err(|source| CompileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| CompileError::Serialize {
        path: path.to_path_buf(),
        source,
    })
}

fn log_by_date(records: &[SphereRecord]) {
    let mut sorted: Vec<&SphereRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.date);

    for record in sorted {
        info!(
            date = %record.date,
            label = %record.label,
            author = %record.author,
            lon = record.longitude,
            lat = record.latitude,
            "{}",
            record.filename
        );
    }
}
