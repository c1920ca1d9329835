//! Great-circle distance and bearing.
//!
//! # Reference
//! Sinnott (1984), "Virtues of the Haversine", Sky & Telescope 68(2)

use ::geo::{Bearing, Haversine};

use crate::models::GeoPoint;

/// Mean Earth radius used for all distances (miles).
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Haversine distance between two points (miles).
///
/// ```text
/// a = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlng/2)
/// c = 2·atan2(√a, √(1−a))
/// d = R·c
/// ```
///
/// # Example
/// ```
/// use site_match::geo::distance_miles;
/// use site_match::models::GeoPoint;
///
/// let a = GeoPoint::new(0.0, 0.0).unwrap();
/// let b = GeoPoint::new(0.0, 1.0).unwrap();
/// assert!((distance_miles(a, b) - 69.094).abs() < 0.001);
/// ```
pub fn distance_miles(a: GeoPoint, b: GeoPoint) -> f64 {
    EARTH_RADIUS_MILES * central_angle(a, b)
}

/// Angular separation between two points (radians).
pub(crate) fn central_angle(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat_rad();
    let lat2 = b.lat_rad();
    let d_lat = (b.lat() - a.lat()).to_radians();
    let d_lng = (b.lng() - a.lng()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1 for near-antipodal points.
    let h = h.clamp(0.0, 1.0);
    2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Initial bearing from `a` towards `b` (degrees clockwise from north, [0, 360)).
///
/// Returns 0.0 for identical points.
pub fn initial_bearing(a: GeoPoint, b: GeoPoint) -> f64 {
    if a == b {
        return 0.0;
    }
    let deg = Haversine.bearing(a.into(), b.into()).rem_euclid(360.0);
    // rem_euclid rounds a tiny negative up to exactly 360
    if deg >= 360.0 {
        0.0
    } else {
        deg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).unwrap()
    }

    #[test]
    fn test_identical_points() {
        let a = p(40.7128, -74.0060);
        assert_eq!(distance_miles(a, a), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let a = p(40.7128, -74.0060);
        let b = p(34.0522, -118.2437);
        assert_eq!(distance_miles(a, b), distance_miles(b, a));
    }

    #[test]
    fn test_manhattan_golden_value() {
        // Lower Manhattan → Williamsburg
        let d = distance_miles(p(40.7128, -74.0060), p(40.7300, -73.9352));
        assert!((d - 3.8933).abs() < 0.001, "got {d}");
    }

    #[test]
    fn test_one_degree_on_equator() {
        let d_lng = distance_miles(p(0.0, 0.0), p(0.0, 1.0));
        let d_lat = distance_miles(p(0.0, 0.0), p(1.0, 0.0));
        assert!((d_lng - 69.0941).abs() < 0.001);
        assert!((d_lat - d_lng).abs() < 1e-9);
    }

    #[test]
    fn test_antipodal() {
        let d = distance_miles(p(0.0, 0.0), p(0.0, 180.0));
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_MILES;
        assert!((d - half_circumference).abs() < 1e-6);
    }

    #[test]
    fn test_dateline_crossing() {
        // 0.2° apart across the antimeridian, not 359.8°
        let d = distance_miles(p(0.0, 179.9), p(0.0, -179.9));
        assert!(d < 14.0, "got {d}");
    }

    #[test]
    fn test_bearing_cardinals() {
        let origin = p(0.0, 0.0);
        assert!((initial_bearing(origin, p(1.0, 0.0)) - 0.0).abs() < 1e-9);
        assert!((initial_bearing(origin, p(0.0, 1.0)) - 90.0).abs() < 1e-9);
        assert!((initial_bearing(origin, p(-1.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!((initial_bearing(origin, p(0.0, -1.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_transatlantic() {
        let nyc = p(40.7128, -74.0060);
        let london = p(51.5074, -0.1278);
        assert!((initial_bearing(nyc, london) - 51.2126).abs() < 1e-3);
        assert!((initial_bearing(london, nyc) - 288.3297).abs() < 1e-3);
    }

    #[test]
    fn test_bearing_identical_points() {
        let a = p(10.0, 10.0);
        assert_eq!(initial_bearing(a, a), 0.0);
    }
}
