//! Shared model for `resorts.json`: a GeoJSON FeatureCollection of
//! resort points whose properties carry slug, pass, region, and asset
//! flags. Properties not touched by a command are preserved losslessly
//! on rewrite.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
pub struct ResortCollection {
    #[serde(rename = "type")]
    pub type_: String,
    pub features: Vec<ResortFeature>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResortFeature {
    /// Point geometry, passed through untouched
    pub geometry: Value,
    pub properties: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResortFeature {
    pub fn slug(&self) -> Option<&str> {
        self.properties.get("slug").and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.properties.get("name").and_then(Value::as_str)
    }

    pub fn pass(&self) -> Option<&str> {
        self.properties.get("pass").and_then(Value::as_str)
    }

    pub fn set_pass(&mut self, label: &str) {
        self.properties
            .insert("pass".to_string(), Value::String(label.to_string()));
    }

    /// The resort's point location as (lng, lat)
    pub fn point(&self) -> Option<(f64, f64)> {
        let coords = self.geometry.get("coordinates")?.as_array()?;
        let lng = coords.first()?.as_f64()?;
        let lat = coords.get(1)?.as_f64()?;
        Some((lng, lat))
    }
}

pub fn load(path: &Path) -> Result<ResortCollection> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read resorts file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse resorts file {}", path.display()))
}

pub fn save(path: &Path, resorts: &ResortCollection) -> Result<()> {
    let json = serde_json::to_string(resorts).context("Failed to serialize resorts")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}
