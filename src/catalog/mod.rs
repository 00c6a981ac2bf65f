//! Batch runner: discover piste files, compute one pose per region,
//! merge into the catalog
//!
//! Each region is independent, so the batch is a parallel map over the
//! discovered files followed by a single-threaded merge of the results.

use crate::camera::pose_from_shape;
use crate::domain::{Catalog, ViewportPose};
use crate::geojson::parse_region;
use crate::geometry::extract::extract_shape;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// The result of one batch run
#[derive(Debug)]
pub struct BatchOutcome {
    pub catalog: Catalog,
    /// Regions whose files held no usable line geometry
    pub skipped: usize,
}

/// Min/max of each pose dimension across the batch, for reporting only
#[derive(Debug)]
pub struct BatchSummary {
    pub zoom: (f64, f64),
    pub pitch: (f64, f64),
    pub bearing: (f64, f64),
}

/// Find every `<slug>.geojson` in the pistes directory, sorted by slug
pub fn discover_regions(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read pistes directory {}", dir.display()))?;

    let mut regions = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("geojson") {
            continue;
        }
        let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        regions.push((slug.to_string(), path));
    }

    regions.sort();
    Ok(regions)
}

/// Compute poses for all regions and merge them into a catalog
///
/// Regions with no qualifying geometry are omitted entirely and counted
/// as skipped; no partial poses are ever stored. With `parallel` the map
/// runs on rayon; the merge is always single-threaded.
pub fn run_batch(regions: Vec<(String, PathBuf)>, parallel: bool) -> Result<BatchOutcome> {
    let results: Result<Vec<(String, Option<ViewportPose>)>> = if parallel {
        regions
            .into_par_iter()
            .map(|(slug, path)| {
                let pose = pose_for_file(&slug, &path)?;
                Ok((slug, pose))
            })
            .collect()
    } else {
        regions
            .into_iter()
            .map(|(slug, path)| {
                let pose = pose_for_file(&slug, &path)?;
                Ok((slug, pose))
            })
            .collect()
    };

    let mut catalog = Catalog::new();
    let mut skipped = 0;
    for (slug, pose) in results? {
        match pose {
            Some(pose) => {
                catalog.insert(slug, pose);
            }
            None => skipped += 1,
        }
    }

    Ok(BatchOutcome { catalog, skipped })
}

fn pose_for_file(slug: &str, path: &Path) -> Result<Option<ViewportPose>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let set = parse_region(slug, &raw)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok(pose_from_shape(&extract_shape(&set)))
}

/// Write the catalog as pretty-printed JSON keyed by slug
pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<()> {
    let json = serde_json::to_string_pretty(catalog).context("Failed to serialize catalog")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Dimension ranges across the catalog, `None` when it is empty
pub fn summarize(catalog: &Catalog) -> Option<BatchSummary> {
    let mut poses = catalog.values();
    let first = poses.next()?;

    let mut summary = BatchSummary {
        zoom: (first.zoom, first.zoom),
        pitch: (first.pitch, first.pitch),
        bearing: (first.bearing, first.bearing),
    };
    for pose in poses {
        summary.zoom = (summary.zoom.0.min(pose.zoom), summary.zoom.1.max(pose.zoom));
        summary.pitch = (
            summary.pitch.0.min(pose.pitch),
            summary.pitch.1.max(pose.pitch),
        );
        summary.bearing = (
            summary.bearing.0.min(pose.bearing),
            summary.bearing.1.max(pose.bearing),
        );
    }

    Some(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn write_geojson(dir: &Path, slug: &str, body: &str) {
        let mut file = File::create(dir.join(format!("{slug}.geojson"))).unwrap();
        file.write_all(body.as_bytes()).unwrap();
    }

    const TWO_LINES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature",
             "geometry": {"type": "LineString", "coordinates": [[-106.50, 39.60], [-106.52, 39.62]]},
             "properties": {"type": "run"}},
            {"type": "Feature",
             "geometry": {"type": "LineString", "coordinates": [[-106.48, 39.58], [-106.51, 39.63]]},
             "properties": {"type": "run"}}
        ]
    }"#;

    const ONE_POINT_LINE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature",
             "geometry": {"type": "LineString", "coordinates": [[-106.50, 39.60]]},
             "properties": {"type": "run"}}
        ]
    }"#;

    #[test]
    fn test_discover_sorted_geojson_only() {
        let dir = tempfile::tempdir().unwrap();
        write_geojson(dir.path(), "vail", TWO_LINES);
        write_geojson(dir.path(), "aspen", TWO_LINES);
        File::create(dir.path().join("notes.txt")).unwrap();

        let regions = discover_regions(dir.path()).unwrap();
        let slugs: Vec<&str> = regions.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(slugs, vec!["aspen", "vail"]);
    }

    #[test]
    fn test_batch_omits_unusable_regions() {
        let dir = tempfile::tempdir().unwrap();
        write_geojson(dir.path(), "vail", TWO_LINES);
        write_geojson(dir.path(), "ghost", ONE_POINT_LINE);

        let regions = discover_regions(dir.path()).unwrap();
        let outcome = run_batch(regions, false).unwrap();

        assert_eq!(outcome.catalog.len(), 1);
        assert!(outcome.catalog.contains_key("vail"));
        assert!(!outcome.catalog.contains_key("ghost"));
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let dir = tempfile::tempdir().unwrap();
        write_geojson(dir.path(), "vail", TWO_LINES);
        write_geojson(dir.path(), "aspen", TWO_LINES);
        write_geojson(dir.path(), "ghost", ONE_POINT_LINE);

        let regions = discover_regions(dir.path()).unwrap();
        let seq = run_batch(regions.clone(), false).unwrap();
        let par = run_batch(regions, true).unwrap();

        assert_eq!(seq.catalog, par.catalog);
        assert_eq!(seq.skipped, par.skipped);
    }

    #[test]
    fn test_unreadable_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write_geojson(dir.path(), "broken", "{not json");

        let regions = discover_regions(dir.path()).unwrap();
        assert!(run_batch(regions, false).is_err());
    }

    #[test]
    fn test_write_catalog_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        write_geojson(dir.path(), "vail", TWO_LINES);

        let regions = discover_regions(dir.path()).unwrap();
        let outcome = run_batch(regions, false).unwrap();

        let out = dir.path().join("camera-angles.json");
        write_catalog(&out, &outcome.catalog).unwrap();

        let raw = fs::read_to_string(&out).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["vail"]["zoom"], 12.5);
        assert_eq!(parsed["vail"]["center"][0], -106.5);
    }

    #[test]
    fn test_summary_ranges() {
        let mut catalog = Catalog::new();
        catalog.insert(
            "a".to_string(),
            crate::domain::ViewportPose {
                center: (0.0, 0.0),
                zoom: 12.5,
                pitch: 55.0,
                bearing: 10.0,
            },
        );
        catalog.insert(
            "b".to_string(),
            crate::domain::ViewportPose {
                center: (1.0, 1.0),
                zoom: 14.5,
                pitch: 75.0,
                bearing: 350.0,
            },
        );

        let summary = summarize(&catalog).unwrap();
        assert_eq!(summary.zoom, (12.5, 14.5));
        assert_eq!(summary.pitch, (55.0, 75.0));
        assert_eq!(summary.bearing, (10.0, 350.0));

        assert!(summarize(&Catalog::new()).is_none());
    }
}
