//! Sphere filename grammar
//!
//! Source images are named `Sph_<YYMMDD>_<rest>-<Label>.<ext>`, e.g.
//! `Sph_230615_x-NordenskioldbreenView.jpg`. The label is CamelCase because
//! spaces and accented letters were stripped when the file was named; both
//! are restored here.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Literal prefix every source filename starts with
pub const SPHERE_PREFIX: &str = "Sph_";

/// Accented place names restored after camel-case splitting
///
/// Applied in order as literal substring replacements. No replacement
/// target contains any source key, so applying the table twice equals
/// applying it once.
pub const TRANSLATIONS: &[(&str, &str)] = &[
    ("Vallakrabreen", "Vallåkrabreen"),
    ("Dronbreen", "Drønbreen"),
    ("Nordenskioldbreen", "Nordenskiöldbreen"),
    ("Midtoya", "Midtøya"),
    ("Aabreen", "Åbreen"),
    ("Konigsberg", "Königsberg"),
];

static SPHERE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Sph_(?P<date>[0-9]{6})_(?P<rest>[^-]*)-(?P<label>.+)$")
        .expect("sphere filename pattern is valid")
});

/// Filename parsing errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilenameError {
    /// Stem does not start with `Sph_`
    #[error("missing 'Sph_' prefix: {0}")]
    MissingPrefix(String),

    /// No six-digit date directly after the prefix, or no underscore after it
    #[error("expected Sph_YYMMDD_ date prefix: {0}")]
    MissingDate(String),

    /// No hyphen separating the label, or nothing after it
    #[error("no '-<Label>' segment: {0}")]
    MissingLabel(String),

    /// Six digits that are not a calendar date (e.g. 231345)
    #[error("invalid date '{raw}': {reason}")]
    InvalidDate { raw: String, reason: String },
}

/// The pieces of a sphere filename stem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SphereName<'a> {
    /// `YYMMDD`
    pub date: &'a str,
    /// Free-form segment between the date and the first hyphen
    pub rest: &'a str,
    /// Everything after the first hyphen, still CamelCase
    pub label: &'a str,
}

/// Split a filename stem into date and label segments
pub fn parse_sphere_name(stem: &str) -> Result<SphereName<'_>, FilenameError> {
    if let Some(caps) = SPHERE_NAME.captures(stem) {
        // All three groups are mandatory in the pattern
        if let (Some(date), Some(rest), Some(label)) =
            (caps.name("date"), caps.name("rest"), caps.name("label"))
        {
            return Ok(SphereName {
                date: date.as_str(),
                rest: rest.as_str(),
                label: label.as_str(),
            });
        }
    }

    Err(classify_failure(stem))
}

/// Name the first part of the grammar a stem violates
fn classify_failure(stem: &str) -> FilenameError {
    let Some(after_prefix) = stem.strip_prefix(SPHERE_PREFIX) else {
        return FilenameError::MissingPrefix(stem.to_string());
    };

    let digits = after_prefix.bytes().take_while(u8::is_ascii_digit).count();
    if digits != 6 || after_prefix.as_bytes().get(6) != Some(&b'_') {
        return FilenameError::MissingDate(stem.to_string());
    }

    FilenameError::MissingLabel(stem.to_string())
}

/// Parse a `YYMMDD` date segment
pub fn parse_date(raw: &str) -> Result<NaiveDate, FilenameError> {
    NaiveDate::parse_from_str(raw, "%y%m%d").map_err(|e| FilenameError::InvalidDate {
        raw: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Insert spaces at CamelCase word boundaries
///
/// A space goes before an ASCII uppercase letter that either follows an
/// ASCII lowercase letter, or (when not the first character) precedes one.
/// So `NordenskioldbreenView` becomes `Nordenskioldbreen View` and a run of
/// capitals keeps its last letter with the next word: `ABCDef` becomes
/// `ABC Def`.
pub fn split_camel_case(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len() + 8);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let after_lower = chars[i - 1].is_ascii_lowercase();
            let before_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
            if after_lower || before_lower {
                out.push(' ');
            }
        }
        out.push(c);
    }

    out
}

/// Restore accented place names
pub fn translate(text: &str) -> String {
    TRANSLATIONS
        .iter()
        .fold(text.to_string(), |acc, &(from, to)| {
            if acc.contains(from) {
                acc.replace(from, to)
            } else {
                acc
            }
        })
}

/// Display label for a raw label segment
pub fn derive_label(raw: &str) -> String {
    translate(&split_camel_case(raw))
}
