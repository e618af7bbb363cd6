//! Sphere fixture builder
//!
//! Generates small JPEGs with a hand-assembled EXIF APP1 segment (little
//! endian TIFF: IFD0 with Artist + GPS IFD pointer, then the GPS IFD).

#![allow(dead_code)]

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

const TAG_ARTIST: u16 = 0x013B;
const TAG_GPS_IFD: u16 = 0x8825;
const TAG_GPS_LAT_REF: u16 = 0x0001;
const TAG_GPS_LAT: u16 = 0x0002;
const TAG_GPS_LON_REF: u16 = 0x0003;
const TAG_GPS_LON: u16 = 0x0004;

const TYPE_BYTE: u16 = 1;
const TYPE_ASCII: u16 = 2;
const TYPE_LONG: u16 = 4;
const TYPE_RATIONAL: u16 = 5;

/// One coordinate: rational components (normally deg, min, sec) plus reference
#[derive(Debug, Clone)]
pub struct Coordinate {
    pub dms: Vec<(u32, u32)>,
    pub reference: &'static str,
    /// Store the reference as BYTE instead of ASCII
    pub byte_reference: bool,
}

impl Coordinate {
    pub fn new(degrees: u32, minutes: u32, seconds: u32, reference: &'static str) -> Self {
        Self::from_rationals(vec![(degrees, 1), (minutes, 1), (seconds, 1)], reference)
    }

    /// Arbitrary (numerator, denominator) components
    pub fn from_rationals(dms: Vec<(u32, u32)>, reference: &'static str) -> Self {
        Self {
            dms,
            reference,
            byte_reference: false,
        }
    }

    pub fn with_byte_reference(mut self) -> Self {
        self.byte_reference = true;
        self
    }

    fn reference_value(&self) -> IfdValue {
        if self.byte_reference {
            IfdValue::Bytes(self.reference.as_bytes().to_vec())
        } else {
            IfdValue::ascii(self.reference)
        }
    }
}

/// Metadata embedded in a fixture
#[derive(Debug, Clone, Default)]
pub struct FixtureExif {
    pub latitude: Option<Coordinate>,
    pub longitude: Option<Coordinate>,
    pub artist: Option<String>,
}

impl FixtureExif {
    /// Longyearbyen-ish coordinates, no artist
    pub fn svalbard() -> Self {
        Self {
            latitude: Some(Coordinate::new(78, 13, 30, "N")),
            longitude: Some(Coordinate::new(15, 39, 0, "E")),
            artist: None,
        }
    }

    pub fn with_artist(mut self, artist: &str) -> Self {
        self.artist = Some(artist.to_string());
        self
    }
}

enum IfdValue {
    Bytes(Vec<u8>),
    Ascii(Vec<u8>),
    Long(u32),
    Rationals(Vec<(u32, u32)>),
}

impl IfdValue {
    fn ascii(text: &str) -> Self {
        let mut bytes = text.as_bytes().to_vec();
        bytes.push(0);
        IfdValue::Ascii(bytes)
    }
}

/// Serialize one IFD (entries + trailing data) placed at `ifd_offset`
fn ifd_bytes(entries: &[(u16, IfdValue)], ifd_offset: u32) -> Vec<u8> {
    let header_len = 2 + 12 * entries.len() as u32 + 4;
    let mut table = Vec::new();
    let mut data = Vec::new();

    table.extend_from_slice(&(entries.len() as u16).to_le_bytes());

    for (tag, value) in entries {
        let (kind, count, payload) = match value {
            IfdValue::Bytes(bytes) => (TYPE_BYTE, bytes.len() as u32, bytes.clone()),
            IfdValue::Ascii(bytes) => (TYPE_ASCII, bytes.len() as u32, bytes.clone()),
            IfdValue::Long(v) => (TYPE_LONG, 1, v.to_le_bytes().to_vec()),
            IfdValue::Rationals(values) => {
                let mut bytes = Vec::new();
                for (num, denom) in values {
                    bytes.extend_from_slice(&num.to_le_bytes());
                    bytes.extend_from_slice(&denom.to_le_bytes());
                }
                (TYPE_RATIONAL, values.len() as u32, bytes)
            }
        };

        table.extend_from_slice(&tag.to_le_bytes());
        table.extend_from_slice(&kind.to_le_bytes());
        table.extend_from_slice(&count.to_le_bytes());

        if payload.len() <= 4 {
            let mut inline = payload;
            inline.resize(4, 0);
            table.extend_from_slice(&inline);
        } else {
            let offset = ifd_offset + header_len + data.len() as u32;
            table.extend_from_slice(&offset.to_le_bytes());
            data.extend_from_slice(&payload);
            if data.len() % 2 == 1 {
                data.push(0);
            }
        }
    }

    // No next IFD
    table.extend_from_slice(&0u32.to_le_bytes());
    table.extend_from_slice(&data);
    table
}

/// TIFF structure carrying the fixture's tags
pub fn tiff_bytes(exif: &FixtureExif) -> Vec<u8> {
    let mut gps_entries = Vec::new();
    if let Some(lat) = &exif.latitude {
        gps_entries.push((TAG_GPS_LAT_REF, lat.reference_value()));
        gps_entries.push((TAG_GPS_LAT, IfdValue::Rationals(lat.dms.clone())));
    }
    if let Some(lon) = &exif.longitude {
        gps_entries.push((TAG_GPS_LON_REF, lon.reference_value()));
        gps_entries.push((TAG_GPS_LON, IfdValue::Rationals(lon.dms.clone())));
    }

    let ifd0_entries = |gps_offset: u32| {
        let mut entries = Vec::new();
        if let Some(artist) = &exif.artist {
            entries.push((TAG_ARTIST, IfdValue::ascii(artist)));
        }
        if !gps_entries.is_empty() {
            entries.push((TAG_GPS_IFD, IfdValue::Long(gps_offset)));
        }
        entries
    };

    const IFD0_OFFSET: u32 = 8;
    // Length does not depend on the pointer value
    let ifd0_len = ifd_bytes(&ifd0_entries(0), IFD0_OFFSET).len() as u32;
    let gps_offset = IFD0_OFFSET + ifd0_len;

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&IFD0_OFFSET.to_le_bytes());
    tiff.extend_from_slice(&ifd_bytes(&ifd0_entries(gps_offset), IFD0_OFFSET));
    if !gps_entries.is_empty() {
        tiff.extend_from_slice(&ifd_bytes(&gps_entries, gps_offset));
    }
    tiff
}

/// APP1 segment wrapping the TIFF block
pub fn app1_segment(exif: &FixtureExif) -> Vec<u8> {
    let tiff = tiff_bytes(exif);
    let length = (2 + 6 + tiff.len()) as u16;

    let mut segment = vec![0xFF, 0xE1];
    segment.extend_from_slice(&length.to_be_bytes());
    segment.extend_from_slice(b"Exif\0\0");
    segment.extend_from_slice(&tiff);
    segment
}

/// Encoded JPEG with the EXIF segment spliced in after SOI
pub fn jpeg_bytes(exif: &FixtureExif, width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]));

    let mut encoded = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut encoded), ImageFormat::Jpeg)
        .expect("encode fixture JPEG");

    let mut out = encoded[..2].to_vec();
    out.extend_from_slice(&app1_segment(exif));
    out.extend_from_slice(&encoded[2..]);
    out
}

/// Write a 512×256 fixture sphere into `dir`
pub fn write_sphere(dir: &Path, name: &str, exif: &FixtureExif) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, jpeg_bytes(exif, 512, 256)).expect("write fixture");
    path
}

/// EXIF block followed by bytes no decoder accepts
pub fn write_corrupt_sphere(dir: &Path, name: &str, exif: &FixtureExif) -> PathBuf {
    let mut bytes = vec![0xFF, 0xD8];
    bytes.extend_from_slice(&app1_segment(exif));
    bytes.extend_from_slice(b"\xFF\xDBgarbage that is not a quantization table");

    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write fixture");
    path
}
