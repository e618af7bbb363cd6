//! Sphere records and their GeoJSON representation
//!
//! The collection is written as a GeoJSON FeatureCollection (RFC 7946) in
//! EPSG:4326 longitude/latitude. The layer `name` and the CRS84 `crs` tag
//! GDAL writes are carried as foreign members.

use chrono::NaiveDate;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// GeoJSON name of EPSG:4326 with lon/lat axis order
pub const CRS84_URN: &str = "urn:ogc:def:crs:OGC:1.3:CRS84";

/// One compiled sphere
#[derive(Debug, Clone, PartialEq)]
pub struct SphereRecord {
    /// Source file base name
    pub filename: String,
    /// Thumbnail path as written, '/'-separated
    pub thumbnail: String,
    pub author: String,
    pub label: String,
    pub date: NaiveDate,
    /// Decimal degrees, west negative
    pub longitude: f64,
    /// Decimal degrees, south negative
    pub latitude: f64,
}

/// Errors turning a feature back into a record
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("feature has no Point geometry")]
    NotAPoint,

    #[error("point has {0} coordinates, expected 2")]
    BadPosition(usize),

    #[error("invalid feature properties: {0}")]
    Properties(#[from] serde_json::Error),
}

/// Feature attributes as read back
#[derive(Deserialize)]
struct SphereProperties {
    filename: String,
    thumbnail: String,
    author: String,
    label: String,
    date: NaiveDate,
}

impl SphereRecord {
    /// Point feature with the five sphere attributes
    pub fn to_feature(&self) -> Feature {
        let mut properties = JsonObject::new();
        properties.insert("filename".to_string(), JsonValue::from(self.filename.as_str()));
        properties.insert("thumbnail".to_string(), JsonValue::from(self.thumbnail.as_str()));
        properties.insert("author".to_string(), JsonValue::from(self.author.as_str()));
        properties.insert("label".to_string(), JsonValue::from(self.label.as_str()));
        properties.insert(
            "date".to_string(),
            JsonValue::from(self.date.format("%Y-%m-%d").to_string()),
        );

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![self.longitude, self.latitude]))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

impl TryFrom<&Feature> for SphereRecord {
    type Error = RecordError;

    fn try_from(feature: &Feature) -> Result<Self, Self::Error> {
        let position = match feature.geometry.as_ref().map(|g| &g.value) {
            Some(Value::Point(position)) => position,
            _ => return Err(RecordError::NotAPoint),
        };
        let [longitude, latitude] = position.as_slice() else {
            return Err(RecordError::BadPosition(position.len()));
        };

        let properties = feature.properties.clone().unwrap_or_default();
        let properties: SphereProperties = serde_json::from_value(JsonValue::Object(properties))?;

        Ok(SphereRecord {
            filename: properties.filename,
            thumbnail: properties.thumbnail,
            author: properties.author,
            label: properties.label,
            date: properties.date,
            longitude: *longitude,
            latitude: *latitude,
        })
    }
}

/// Named collection of spheres, (de)serialized as a GeoJSON FeatureCollection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "FeatureCollection", try_from = "FeatureCollection")]
pub struct SphereCollection {
    /// Layer name (output file stem)
    pub name: String,
    pub records: Vec<SphereRecord>,
}

impl SphereCollection {
    pub fn new(name: impl Into<String>, records: &[SphereRecord]) -> Self {
        Self {
            name: name.into(),
            records: records.to_vec(),
        }
    }

    /// Record whose `filename` matches
    pub fn find(&self, filename: &str) -> Option<&SphereRecord> {
        self.records.iter().find(|record| record.filename == filename)
    }
}

impl From<SphereCollection> for FeatureCollection {
    fn from(collection: SphereCollection) -> Self {
        let mut foreign_members = JsonObject::new();
        foreign_members.insert("name".to_string(), JsonValue::from(collection.name));
        foreign_members.insert(
            "crs".to_string(),
            json!({ "type": "name", "properties": { "name": CRS84_URN } }),
        );

        FeatureCollection {
            bbox: None,
            features: collection.records.iter().map(SphereRecord::to_feature).collect(),
            foreign_members: Some(foreign_members),
        }
    }
}

impl TryFrom<FeatureCollection> for SphereCollection {
    type Error = RecordError;

    fn try_from(collection: FeatureCollection) -> Result<Self, Self::Error> {
        let name = collection
            .foreign_members
            .as_ref()
            .and_then(|members| members.get("name"))
            .and_then(JsonValue::as_str)
            .unwrap_or_default()
            .to_string();

        let records = collection
            .features
            .iter()
            .map(SphereRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { name, records })
    }
}
