//! GeoJSON `FeatureCollection` reader.
//!
//! Only line geometries carry positions. Every other feature (points,
//! polygons, null geometry) still yields a [`RawFeature`], with no positions,
//! so feature indices stay aligned with the order in the file.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::feature::{FeatureSource, RawFeature, RawPosition, SourceError};

#[derive(Debug, Deserialize)]
struct GeoJsonRoot {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    geometry: Option<Geometry>,
    #[serde(default)]
    properties: Option<serde_json::Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    LineString { coordinates: Vec<Vec<f64>> },
    MultiLineString { coordinates: Vec<Vec<Vec<f64>>> },
    #[serde(other)]
    Other,
}

/// Reads road features from a GeoJSON file or an in-memory document.
#[derive(Debug, Clone)]
pub enum GeoJsonSource {
    File(PathBuf),
    Text(String),
}

impl GeoJsonSource {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

impl FeatureSource for GeoJsonSource {
    fn read_features(&mut self) -> Result<Vec<RawFeature>, SourceError> {
        match self {
            GeoJsonSource::File(path) => {
                let file = File::open(path.as_path())?;
                read_feature_collection(BufReader::new(file))
            }
            GeoJsonSource::Text(text) => read_feature_collection(text.as_bytes()),
        }
    }
}

/// Decode a `FeatureCollection` from any reader.
pub fn read_feature_collection<R: Read>(reader: R) -> Result<Vec<RawFeature>, SourceError> {
    let root: GeoJsonRoot = serde_json::from_reader(reader)?;

    root.features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| convert_feature(index, feature))
        .collect()
}

fn convert_feature(index: usize, feature: Feature) -> Result<RawFeature, SourceError> {
    let positions = match feature.geometry {
        Some(Geometry::LineString { coordinates }) => convert_line(index, &coordinates)?,
        // All parts, in order, as one vertex list.
        Some(Geometry::MultiLineString { coordinates }) => {
            let mut all = Vec::new();
            for line in &coordinates {
                all.extend(convert_line(index, line)?);
            }
            all
        }
        Some(Geometry::Other) | None => Vec::new(),
    };

    let properties = feature.properties.unwrap_or_default();

    Ok(RawFeature {
        positions,
        width_hint: property_text(&properties, "width"),
        lane_hint: property_text(&properties, "lanes"),
        kind: property_text(&properties, "highway"),
    })
}

fn convert_line(index: usize, coordinates: &[Vec<f64>]) -> Result<Vec<RawPosition>, SourceError> {
    coordinates
        .iter()
        .map(|pair| match pair.as_slice() {
            // Any third ordinate (elevation) is ignored.
            [lon, lat, ..] => Ok(RawPosition::new(*lon, *lat)),
            _ => Err(SourceError::MalformedFeature {
                index,
                reason: format!("position with {} ordinates", pair.len()),
            }),
        })
        .collect()
}

/// Numbers and strings are both accepted; OSM exports commonly use either.
fn property_text(properties: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    match properties.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
