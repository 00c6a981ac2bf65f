//! Great-circle distance and bearing on the WGS84 sphere
//!
//! Coordinates are (lng, lat) pairs in decimal degrees, matching GeoJSON
//! axis order throughout the crate.

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points via the haversine formula
///
/// Symmetric in its arguments and exactly 0 for coincident points.
pub fn distance_km(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (lng1, lat1) = a;
    let (lng2, lat2) = b;

    let dlat = (lat2 - lat1).to_radians();
    let dlng = (lng2 - lng1).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlng / 2.0).sin().powi(2);

    EARTH_RADIUS_KM * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Initial compass bearing traveling from `a` to `b`, in [0, 360)
///
/// 0 = north, clockwise. Direction is undefined for coincident points;
/// callers must exclude degenerate segments beforehand.
pub fn bearing_deg(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (lng1, lat1) = a;
    let (lng2, lat2) = b;

    let dlng = (lng2 - lng1).to_radians();
    let lat1r = lat1.to_radians();
    let lat2r = lat2.to_radians();

    let x = dlng.sin() * lat2r.cos();
    let y = lat1r.cos() * lat2r.sin() - lat1r.sin() * lat2r.cos() * dlng.cos();

    (x.atan2(y).to_degrees() + 360.0) % 360.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const DENVER: (f64, f64) = (-104.9903, 39.7392);
    const VAIL: (f64, f64) = (-106.3742, 39.6403);

    #[test]
    fn test_distance_symmetric() {
        let d1 = distance_km(DENVER, VAIL);
        let d2 = distance_km(VAIL, DENVER);
        assert_eq!(d1, d2);
    }

    #[test]
    fn test_distance_coincident_is_zero() {
        assert_eq!(distance_km(DENVER, DENVER), 0.0);
    }

    #[test]
    fn test_distance_one_degree_latitude() {
        // 1 degree of latitude is ~111.19 km on a 6371 km sphere
        let d = distance_km((0.0, 0.0), (0.0, 1.0));
        assert!((d - 111.195).abs() < 0.01);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = (0.0, 0.0);
        assert!((bearing_deg(origin, (0.0, 1.0)) - 0.0).abs() < 1e-9);
        assert!((bearing_deg(origin, (1.0, 0.0)) - 90.0).abs() < 1e-9);
        assert!((bearing_deg(origin, (0.0, -1.0)) - 180.0).abs() < 1e-9);
        assert!((bearing_deg(origin, (-1.0, 0.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_in_range() {
        let pairs = [
            ((-106.5, 39.6), (-106.52, 39.62)),
            ((10.0, 45.0), (9.0, 44.0)),
            ((179.9, 0.0), (-179.9, 0.0)),
            ((0.0, 89.0), (0.0, -89.0)),
        ];
        for (a, b) in pairs {
            let bearing = bearing_deg(a, b);
            assert!((0.0..360.0).contains(&bearing), "bearing {bearing} out of range");
        }
    }
}
