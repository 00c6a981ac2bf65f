use serde::Serialize;
use std::collections::BTreeMap;

/// Initial camera parameters for one resort's 3D map view
///
/// Serializes to `{"center": [lng, lat], "zoom": n, "pitch": n, "bearing": n}`
/// for direct consumption by the map front end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewportPose {
    /// Bounding-box midpoint as (lng, lat), rounded to 6 decimals
    pub center: (f64, f64),
    /// Map zoom level, one of the fixed step-function values
    pub zoom: f64,
    /// Camera tilt in degrees, rounded to 1 decimal
    pub pitch: f64,
    /// Compass bearing in [0, 360), rounded to 1 decimal
    pub bearing: f64,
}

/// The batch output: resort slug -> pose, keys sorted for stable output
pub type Catalog = BTreeMap<String, ViewportPose>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_serialization_shape() {
        let pose = ViewportPose {
            center: (-106.5, 39.605),
            zoom: 12.5,
            pitch: 70.0,
            bearing: 148.8,
        };
        let json = serde_json::to_value(&pose).unwrap();
        assert_eq!(json["center"][0], -106.5);
        assert_eq!(json["center"][1], 39.605);
        assert_eq!(json["zoom"], 12.5);
        assert_eq!(json["pitch"], 70.0);
        assert_eq!(json["bearing"], 148.8);
    }
}
