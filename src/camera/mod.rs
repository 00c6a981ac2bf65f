//! Viewport heuristic: map a region's extracted shape to an initial
//! camera pose (center, zoom, pitch, bearing)
//!
//! The pitch mapping and zoom thresholds are empirically chosen framing
//! constants; they are fixed values, not tunables.

use crate::domain::ViewportPose;
use crate::geometry::circular::mean_bearing_deg;
use crate::geometry::extract::RegionShape;
use crate::geometry::spherical::distance_km;

/// Bounding-box spans below this are treated as zero extent
const DEGENERATE_RANGE: f64 = 1e-6;

/// Derive the camera pose for one region, or `None` for an empty shape
pub fn pose_from_shape(shape: &RegionShape) -> Option<ViewportPose> {
    if shape.is_empty() {
        return None;
    }

    let (min_lng, max_lng, min_lat, max_lat) = bounding_box(&shape.points);

    let center = (
        round6((min_lng + max_lng) / 2.0),
        round6((min_lat + max_lat) / 2.0),
    );

    // Camera faces uphill: opposite the average downhill travel direction
    let mean = mean_bearing_deg(&shape.chord_bearings);
    let bearing = round1((mean + 180.0) % 360.0) % 360.0;

    let pitch = pitch_for_bbox(min_lng, max_lng, min_lat, max_lat);

    let diag_km = distance_km((min_lng, min_lat), (max_lng, max_lat));
    let zoom = zoom_for_diagonal(diag_km);

    Some(ViewportPose {
        center,
        zoom,
        pitch,
        bearing,
    })
}

fn bounding_box(points: &[(f64, f64)]) -> (f64, f64, f64, f64) {
    let mut min_lng = f64::MAX;
    let mut max_lng = f64::MIN;
    let mut min_lat = f64::MAX;
    let mut max_lat = f64::MIN;

    for &(lng, lat) in points {
        min_lng = min_lng.min(lng);
        max_lng = max_lng.max(lng);
        min_lat = min_lat.min(lat);
        max_lat = max_lat.max(lat);
    }

    (min_lng, max_lng, min_lat, max_lat)
}

/// Tilt from the bounding box's latitude-corrected aspect ratio
///
/// Elongated north-south regions get a steeper top-down tilt to show
/// their full extent; wide east-west regions get a shallower, more
/// oblique one. Longitude span shrinks with latitude, so it is scaled
/// by cos(mid latitude) before the ratio is taken.
fn pitch_for_bbox(min_lng: f64, max_lng: f64, min_lat: f64, max_lat: f64) -> f64 {
    let lat_range = max_lat - min_lat;
    let lng_range = max_lng - min_lng;
    let mid_lat = (min_lat + max_lat) / 2.0;
    let lng_range_adjusted = lng_range * mid_lat.to_radians().cos();

    if lng_range_adjusted < DEGENERATE_RANGE && lat_range < DEGENERATE_RANGE {
        // Point-like region
        65.0
    } else if lng_range_adjusted < DEGENERATE_RANGE {
        // Perfectly north-south region
        75.0
    } else {
        // Aspect 0.5 -> 55 degrees, 2.0 -> 75 degrees, linear between
        let aspect = lat_range / lng_range_adjusted;
        let t = ((aspect - 0.5) / 1.5).clamp(0.0, 1.0);
        round1(55.0 + t * 20.0)
    }
}

/// Zoom step function over the bounding-box diagonal (SW to NE corner)
///
/// Brackets are half-open on the lower bound: exactly 2.0 km falls in
/// the `< 5` bracket.
fn zoom_for_diagonal(diag_km: f64) -> f64 {
    if diag_km < 2.0 {
        14.5
    } else if diag_km < 5.0 {
        13.5
    } else if diag_km < 10.0 {
        12.5
    } else if diag_km < 20.0 {
        11.5
    } else {
        10.5
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn round6(v: f64) -> f64 {
    (v * 1e6).round() / 1e6
}
