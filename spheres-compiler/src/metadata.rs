//! Embedded metadata extraction
//!
//! Reads the EXIF block of a sphere image once and pulls out:
//! - GPS latitude/longitude (DMS rationals + hemisphere references)
//! - Artist, used as the photographer credit

use exif::{Exif, In, Reader, Tag, Value};
use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;
use thiserror::Error;

use crate::gps::{self, Axis, Dms, GpsError, Hemisphere};

/// Author recorded when the Artist tag is absent or blank
pub const DEFAULT_AUTHOR: &str = "Unspecified";

/// Pair of EXIF tags holding one coordinate
#[derive(Debug, Clone, Copy)]
pub struct CoordinateTags {
    pub axis: Axis,
    pub value: Tag,
    pub value_name: &'static str,
    pub reference: Tag,
    pub reference_name: &'static str,
}

pub const LATITUDE_TAGS: CoordinateTags = CoordinateTags {
    axis: Axis::Latitude,
    value: Tag::GPSLatitude,
    value_name: "GPSLatitude",
    reference: Tag::GPSLatitudeRef,
    reference_name: "GPSLatitudeRef",
};

pub const LONGITUDE_TAGS: CoordinateTags = CoordinateTags {
    axis: Axis::Longitude,
    value: Tag::GPSLongitude,
    value_name: "GPSLongitude",
    reference: Tag::GPSLongitudeRef,
    reference_name: "GPSLongitudeRef",
};

pub const AUTHOR_TAG: Tag = Tag::Artist;

/// Metadata extraction errors
#[derive(Debug, Error)]
pub enum MetadataError {
    /// I/O error (file open/read)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File carries no EXIF block at all
    #[error("no EXIF metadata found")]
    NoExif,

    /// EXIF block present but could not be parsed
    #[error("unreadable EXIF metadata: {0}")]
    Unreadable(String),

    /// A required GPS tag is absent
    #[error("missing GPS tag {0}")]
    MissingGps(&'static str),

    /// A GPS tag is present with the wrong type, arity or a zero denominator
    #[error("invalid GPS tag {tag}: {reason}")]
    InvalidGps { tag: &'static str, reason: String },

    /// Coordinate conversion failed
    #[error("GPS conversion failed: {0}")]
    Gps(#[from] GpsError),
}

/// Metadata pulled from one sphere image
#[derive(Debug, Clone, PartialEq)]
pub struct SphereMetadata {
    /// Signed decimal degrees, south negative
    pub latitude: f64,
    /// Signed decimal degrees, west negative
    pub longitude: f64,
    /// Artist, or [`DEFAULT_AUTHOR`]
    pub author: String,
}

/// Read GPS and author metadata from an image file
pub fn read_metadata(path: &Path) -> Result<SphereMetadata, MetadataError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let metadata = read_metadata_from(&mut reader)?;

    tracing::debug!(
        file = %path.display(),
        latitude = metadata.latitude,
        longitude = metadata.longitude,
        author = %metadata.author,
        "Extracted metadata"
    );

    Ok(metadata)
}

/// Read metadata from any seekable image container (JPEG, TIFF, PNG, WebP, HEIF)
pub fn read_metadata_from<R: BufRead + Seek>(reader: &mut R) -> Result<SphereMetadata, MetadataError> {
    let exif = Reader::new()
        .read_from_container(reader)
        .map_err(|e| match e {
            exif::Error::NotFound(_) => MetadataError::NoExif,
            exif::Error::Io(io) => MetadataError::Io(io),
            other => MetadataError::Unreadable(other.to_string()),
        })?;

    Ok(SphereMetadata {
        latitude: read_coordinate(&exif, LATITUDE_TAGS)?,
        longitude: read_coordinate(&exif, LONGITUDE_TAGS)?,
        author: read_author(&exif),
    })
}

fn read_coordinate(exif: &Exif, tags: CoordinateTags) -> Result<f64, MetadataError> {
    let dms = read_dms(exif, tags.value, tags.value_name)?;

    let hemisphere: Hemisphere = read_reference(exif, tags.reference, tags.reference_name)?.parse()?;

    Ok(gps::to_decimal(tags.axis, dms, hemisphere)?)
}

fn read_dms(exif: &Exif, tag: Tag, name: &'static str) -> Result<Dms, MetadataError> {
    let field = exif
        .get_field(tag, In::PRIMARY)
        .ok_or(MetadataError::MissingGps(name))?;

    let rationals = match &field.value {
        Value::Rational(values) => values,
        other => {
            return Err(MetadataError::InvalidGps {
                tag: name,
                reason: format!("expected RATIONAL, found {:?}", other),
            })
        }
    };

    let [degrees, minutes, seconds] = rationals.as_slice() else {
        return Err(MetadataError::InvalidGps {
            tag: name,
            reason: format!("expected 3 components, found {}", rationals.len()),
        });
    };

    if rationals.iter().any(|r| r.denom == 0) {
        return Err(MetadataError::InvalidGps {
            tag: name,
            reason: "zero denominator".to_string(),
        });
    }

    Ok(Dms::new(degrees.to_f64(), minutes.to_f64(), seconds.to_f64()))
}

/// Hemisphere letter of a `*Ref` tag, which must be ASCII
fn read_reference(exif: &Exif, tag: Tag, name: &'static str) -> Result<String, MetadataError> {
    let field = exif.get_field(tag, In::PRIMARY).ok_or(MetadataError::MissingGps(name))?;

    match &field.value {
        Value::Ascii(strings) => Ok(strings
            .first()
            .map(|bytes| String::from_utf8_lossy(bytes).trim_end_matches('\0').to_string())
            .unwrap_or_default()),
        other => Err(MetadataError::InvalidGps {
            tag: name,
            reason: format!("expected ASCII, found {:?}", other),
        }),
    }
}

/// First ASCII string of a tag, NUL-trimmed
fn read_ascii(exif: &Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match &field.value {
        Value::Ascii(strings) => strings
            .first()
            .map(|bytes| String::from_utf8_lossy(bytes).trim_end_matches('\0').to_string()),
        _ => None,
    }
}

fn read_author(exif: &Exif) -> String {
    read_ascii(exif, AUTHOR_TAG)
        .map(|author| author.trim().to_string())
        .filter(|author| !author.is_empty())
        .unwrap_or_else(|| DEFAULT_AUTHOR.to_string())
}
