use crate::domain::{FeatureKind, LineFeature, RegionGeometrySet};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeoJsonError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a FeatureCollection, got {0:?}")]
    NotFeatureCollection(String),
}

/// Raw GeoJSON FeatureCollection, structurally deserialized
#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    type_: String,
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    geometry: Option<Geometry>,
    #[serde(default)]
    properties: Option<HashMap<String, Value>>,
}

/// Coordinates stay as raw JSON until the geometry type is known;
/// non-LineString geometries are skipped, never an error
#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    type_: String,
    #[serde(default)]
    coordinates: Value,
}

/// Parse one region's piste GeoJSON into domain line features
///
/// Only `LineString` geometries contribute. Name, difficulty, and the
/// run/lift discriminator are carried through from the properties;
/// everything else is ignored. Malformed coordinate arrays cause the
/// feature to be skipped, matching the treatment of foreign geometry
/// types.
pub fn parse_region(slug: &str, raw: &str) -> Result<RegionGeometrySet, GeoJsonError> {
    let collection: FeatureCollection = serde_json::from_str(raw)?;
    if collection.type_ != "FeatureCollection" {
        return Err(GeoJsonError::NotFeatureCollection(collection.type_));
    }

    let mut features = Vec::new();

    for feature in &collection.features {
        let Some(geometry) = &feature.geometry else {
            continue;
        };
        if geometry.type_ != "LineString" {
            continue;
        }
        let Some(points) = line_coordinates(&geometry.coordinates) else {
            continue;
        };

        let props = feature.properties.as_ref();
        let get = |key: &str| props.and_then(|p| p.get(key)).and_then(Value::as_str);

        let kind = FeatureKind::from_properties(get("type"), get("aerialway"));

        features.push(LineFeature {
            name: get("name").filter(|n| !n.is_empty()).map(str::to_string),
            kind,
            difficulty: get("difficulty").map(str::to_string),
            points,
        });
    }

    Ok(RegionGeometrySet::new(slug, features))
}

/// Read a LineString coordinate array as (lng, lat) pairs
fn line_coordinates(value: &Value) -> Option<Vec<(f64, f64)>> {
    let positions = value.as_array()?;
    let mut points = Vec::with_capacity(positions.len());

    for position in positions {
        let pair = position.as_array()?;
        let lng = pair.first()?.as_f64()?;
        let lat = pair.get(1)?.as_f64()?;
        points.push((lng, lat));
    }

    Some(points)
}
