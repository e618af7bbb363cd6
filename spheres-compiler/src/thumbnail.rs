//! Thumbnail generation
//!
//! Each sphere gets one JPEG preview at `<thumbnail_dir>/<stem>.thumbnail`,
//! bounded to 256×128. Existing thumbnails are never regenerated.

use image::{DynamicImage, ImageFormat, ImageReader};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Maximum thumbnail width in pixels
pub const THUMBNAIL_MAX_WIDTH: u32 = 256;

/// Maximum thumbnail height in pixels
pub const THUMBNAIL_MAX_HEIGHT: u32 = 128;

/// Extension replacing the source image's extension
pub const THUMBNAIL_EXTENSION: &str = "thumbnail";

/// Thumbnail generation errors
#[derive(Debug, Error)]
pub enum ThumbnailError {
    /// Source pixels could not be decoded
    #[error("cannot decode image {0}: {1}")]
    Decode(PathBuf, String),

    /// JPEG encode or write failed
    #[error("cannot write thumbnail {0}: {1}")]
    Encode(PathBuf, String),

    /// Creating the thumbnail directory failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// What [`ensure_thumbnail`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailOutcome {
    /// A new thumbnail was written
    Created,
    /// A file already existed at the destination
    Skipped,
}

/// Deterministic thumbnail path for a source image
pub fn thumbnail_path(thumbnail_dir: &Path, source: &Path) -> PathBuf {
    let stem = source.file_stem().unwrap_or(source.as_os_str());
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(THUMBNAIL_EXTENSION);
    thumbnail_dir.join(name)
}

/// Create the thumbnail at `dest` unless one already exists
pub fn ensure_thumbnail(source: &Path, dest: &Path) -> Result<ThumbnailOutcome, ThumbnailError> {
    if dest.is_file() {
        tracing::debug!(thumbnail = %dest.display(), "Thumbnail exists, skipping");
        return Ok(ThumbnailOutcome::Skipped);
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let img = decode(source)?;

    let thumbnail = shrink_to_fit(&img, THUMBNAIL_MAX_WIDTH, THUMBNAIL_MAX_HEIGHT);

    // JPEG has no alpha channel
    DynamicImage::ImageRgb8(thumbnail.to_rgb8())
        .save_with_format(dest, ImageFormat::Jpeg)
        .map_err(|e| ThumbnailError::Encode(dest.to_path_buf(), e.to_string()))?;

    tracing::info!(
        source = %source.display(),
        thumbnail = %dest.display(),
        width = thumbnail.width(),
        height = thumbnail.height(),
        "Generated thumbnail"
    );

    Ok(ThumbnailOutcome::Created)
}

/// Decode an image, sniffing the format from its bytes before its extension
pub fn decode(path: &Path) -> Result<DynamicImage, ThumbnailError> {
    let decode_error = |reason: String| ThumbnailError::Decode(path.to_path_buf(), reason);

    ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| decode_error(e.to_string()))?
        .decode()
        .map_err(|e| decode_error(e.to_string()))
}

/// Downsample to fit inside `max_width`×`max_height`, keeping aspect ratio
///
/// Images already inside the box are returned unchanged (never enlarged).
pub fn shrink_to_fit(img: &DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    if img.width() <= max_width && img.height() <= max_height {
        return img.clone();
    }
    img.thumbnail(max_width, max_height)
}
