//! spheres-compiler library
//!
//! Turns a directory of `Sph_*` panoramas into a GeoJSON collection plus a
//! directory of thumbnails:
//! - [`filename`]: date and label from the file name
//! - [`metadata`]: GPS and author from EXIF
//! - [`thumbnail`]: 256×128 JPEG previews
//! - [`compile`]: the batch pipeline

pub mod compile;
pub mod error;
pub mod filename;
pub mod gps;
pub mod metadata;
pub mod record;
pub mod scanner;
pub mod thumbnail;

pub use crate::compile::{compile_all, process_file, CompileSummary, CompilerConfig};
pub use crate::error::{CompileError, CompileResult};
pub use crate::record::{SphereCollection, SphereRecord};
