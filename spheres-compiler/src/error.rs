//! Error types for the sphere compiler
//!
//! Every per-file failure carries the offending path so the batch log says
//! exactly which file to fix before rerunning.

use std::path::PathBuf;
use thiserror::Error;

use crate::filename::FilenameError;
use crate::metadata::MetadataError;
use crate::scanner::ScanError;
use crate::thumbnail::ThumbnailError;

/// Compiler error type
#[derive(Debug, Error)]
pub enum CompileError {
    /// Sphere directory could not be listed
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Path has no usable UTF-8 file name
    #[error("{0}: file name is not valid UTF-8")]
    NonUtf8Name(PathBuf),

    /// Malformed filename (no prefix, date or label, or a bad date)
    #[error("{path}: {source}")]
    Filename {
        path: PathBuf,
        #[source]
        source: FilenameError,
    },

    /// Missing/invalid GPS or unreadable EXIF
    #[error("{path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: MetadataError,
    },

    /// Image could not be decoded or the thumbnail could not be written
    #[error("{path}: {source}")]
    Thumbnail {
        path: PathBuf,
        #[source]
        source: ThumbnailError,
    },

    /// GeoJSON serialization failed
    #[error("Failed to serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Reading a collection file back failed
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the collection file failed
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for compiler operations
pub type CompileResult<T> = Result<T, CompileError>;
