//! Shape extraction: flatten a region's line features into the two
//! inputs the camera heuristic needs

use crate::domain::RegionGeometrySet;
use crate::geometry::spherical::bearing_deg;

/// The extracted shape of one region: every vertex, plus one chord
/// bearing per qualifying line
#[derive(Debug, Clone, Default)]
pub struct RegionShape {
    /// All coordinates of all qualifying features, (lng, lat)
    pub points: Vec<(f64, f64)>,
    /// Per line: bearing from its first vertex to its last vertex
    pub chord_bearings: Vec<f64>,
}

impl RegionShape {
    /// A region with no qualifying geometry has no computable pose
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() || self.chord_bearings.is_empty()
    }
}

/// Collect coordinates and chord bearings from every feature with
/// at least 2 vertices
///
/// The chord bearing is the whole-line direction (first vertex to last
/// vertex), not a per-segment average. Lines with fewer than 2 vertices
/// are skipped entirely, so a region where nothing qualifies yields an
/// empty shape.
pub fn extract_shape(set: &RegionGeometrySet) -> RegionShape {
    let mut shape = RegionShape::default();

    for feature in &set.features {
        if !feature.qualifies() {
            continue;
        }

        shape.points.extend_from_slice(&feature.points);

        let first = feature.points[0];
        let last = feature.points[feature.points.len() - 1];
        shape.chord_bearings.push(bearing_deg(first, last));
    }

    shape
}
