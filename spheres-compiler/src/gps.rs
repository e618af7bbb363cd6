//! GPS coordinate conversion
//!
//! EXIF stores each coordinate as an unsigned (degrees, minutes, seconds)
//! triple plus a one-letter hemisphere reference. Conversion yields signed
//! decimal degrees in the EPSG:4326 convention (south and west negative).

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// GPS conversion errors
#[derive(Debug, Error, PartialEq)]
pub enum GpsError {
    /// Reference letter is not one of N/S/E/W
    #[error("unknown hemisphere reference {0:?}")]
    UnknownReference(String),

    /// N/S given for a longitude, or E/W for a latitude
    #[error("{reference} is not a valid {axis} reference")]
    WrongAxis { axis: Axis, reference: Hemisphere },

    /// Negative, NaN or infinite component
    #[error("invalid {axis} component: {value}")]
    InvalidComponent { axis: Axis, value: f64 },
}

/// Which coordinate a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => f.write_str("latitude"),
            Axis::Longitude => f.write_str("longitude"),
        }
    }
}

/// Hemisphere reference flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    pub fn axis(self) -> Axis {
        match self {
            Hemisphere::North | Hemisphere::South => Axis::Latitude,
            Hemisphere::East | Hemisphere::West => Axis::Longitude,
        }
    }

    fn is_negative(self) -> bool {
        matches!(self, Hemisphere::South | Hemisphere::West)
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Hemisphere::North => "N",
            Hemisphere::South => "S",
            Hemisphere::East => "E",
            Hemisphere::West => "W",
        };
        f.write_str(letter)
    }
}

impl FromStr for Hemisphere {
    type Err = GpsError;

    /// Parses "N", "S", "E" or "W", ignoring surrounding whitespace and NULs
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_matches(|c: char| c == '\0' || c.is_whitespace()) {
            "N" => Ok(Hemisphere::North),
            "S" => Ok(Hemisphere::South),
            "E" => Ok(Hemisphere::East),
            "W" => Ok(Hemisphere::West),
            other => Err(GpsError::UnknownReference(other.to_string())),
        }
    }
}

/// Degrees/minutes/seconds triple as read from EXIF
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl Dms {
    pub fn new(degrees: f64, minutes: f64, seconds: f64) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
        }
    }

    /// Unsigned decimal magnitude: `degrees + minutes/60 + seconds/3600`
    pub fn magnitude(&self) -> f64 {
        self.degrees + self.minutes / 60.0 + self.seconds / 3600.0
    }
}

/// Convert a DMS triple to signed decimal degrees on the given axis
///
/// South and west are negated. A zero magnitude is always `+0.0`, never
/// `-0.0`, whichever hemisphere it is tagged with.
pub fn to_decimal(axis: Axis, dms: Dms, hemisphere: Hemisphere) -> Result<f64, GpsError> {
    if hemisphere.axis() != axis {
        return Err(GpsError::WrongAxis {
            axis,
            reference: hemisphere,
        });
    }

    for value in [dms.degrees, dms.minutes, dms.seconds] {
        if !value.is_finite() || value < 0.0 {
            return Err(GpsError::InvalidComponent { axis, value });
        }
    }

    let magnitude = dms.magnitude();
    if magnitude == 0.0 {
        return Ok(0.0);
    }

    Ok(if hemisphere.is_negative() {
        -magnitude
    } else {
        magnitude
    })
}
