//! Region assignment: tag each resort with the id of the first region
//! whose bounding box contains its point

use crate::resorts::ResortCollection;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// One named region with bounds `[[sw_lng, sw_lat], [ne_lng, ne_lat]]`
#[derive(Debug, Deserialize)]
pub struct Region {
    pub id: String,
    pub bounds: [[f64; 2]; 2],
}

impl Region {
    /// Containment is inclusive on all four edges
    pub fn contains(&self, lng: f64, lat: f64) -> bool {
        let [[sw_lng, sw_lat], [ne_lng, ne_lat]] = self.bounds;
        (sw_lng..=ne_lng).contains(&lng) && (sw_lat..=ne_lat).contains(&lat)
    }
}

pub fn load_regions(path: &Path) -> Result<Vec<Region>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read regions file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse regions file {}", path.display()))
}

#[derive(Debug)]
pub struct AssignOutcome {
    pub assigned: usize,
    pub unassigned: usize,
    /// Resort count per region id, descending
    pub distribution: Vec<(String, usize)>,
}

/// Set `properties.region_id` on every resort; first matching region
/// wins, unmatched resorts get null
pub fn assign_regions(resorts: &mut ResortCollection, regions: &[Region]) -> AssignOutcome {
    let mut assigned = 0;
    let mut unassigned = 0;
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();

    for feature in &mut resorts.features {
        let matched = feature
            .point()
            .and_then(|(lng, lat)| regions.iter().find(|r| r.contains(lng, lat)));

        match matched {
            Some(region) => {
                feature.properties.insert(
                    "region_id".to_string(),
                    Value::String(region.id.clone()),
                );
                *counts.entry(region.id.clone()).or_insert(0) += 1;
                assigned += 1;
            }
            None => {
                feature
                    .properties
                    .insert("region_id".to_string(), Value::Null);
                unassigned += 1;
            }
        }
    }

    let mut distribution: Vec<(String, usize)> = counts.into_iter().collect();
    distribution.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    AssignOutcome {
        assigned,
        unassigned,
        distribution,
    }
}
