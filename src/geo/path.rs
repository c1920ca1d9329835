//! Great-circle interpolation.
//!
//! Used to draw resource → site flow lines that follow the curvature a
//! web map shows, and to place the moving head of an animated path.
//! The intermediate-point math comes from `geo`'s Haversine metric space.

use ::geo::{Haversine, InterpolatePoint};

use super::distance::central_angle;
use crate::models::GeoPoint;

/// Point at `fraction` of the way from `a` to `b` along the great circle.
///
/// `fraction` is clamped to [0, 1]. Antipodal endpoints have no unique
/// great circle; a straight lat/lng blend is returned for them.
pub fn interpolate(a: GeoPoint, b: GeoPoint, fraction: f64) -> GeoPoint {
    let f = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    if f == 0.0 {
        return a;
    }
    if f == 1.0 {
        return b;
    }

    let delta = central_angle(a, b);
    if delta < 1e-12 {
        return a;
    }
    if delta.sin().abs() < 1e-12 {
        return GeoPoint::from_trusted(
            a.lat() + (b.lat() - a.lat()) * f,
            a.lng() + (b.lng() - a.lng()) * f,
        );
    }

    GeoPoint::from_geo(Haversine.point_at_ratio_between(a.into(), b.into(), f))
}

/// Evenly spaced points from `a` to `b` inclusive.
///
/// Returns `segments + 1` points; `segments == 0` is treated as 1.
pub fn great_circle_path(a: GeoPoint, b: GeoPoint, segments: usize) -> Vec<GeoPoint> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| interpolate(a, b, i as f64 / segments as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::distance_miles;

    fn p(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).unwrap()
    }

    #[test]
    fn test_endpoints() {
        let a = p(40.7128, -74.0060);
        let b = p(40.7300, -73.9352);
        assert_eq!(interpolate(a, b, 0.0), a);
        assert_eq!(interpolate(a, b, 1.0), b);
        assert_eq!(interpolate(a, b, -3.0), a);
        assert_eq!(interpolate(a, b, 7.0), b);
    }

    #[test]
    fn test_midpoint_on_equator() {
        let m = interpolate(p(0.0, 0.0), p(0.0, 10.0), 0.5);
        assert!(m.lat().abs() < 1e-9);
        assert!((m.lng() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_midpoint_equidistant() {
        let a = p(40.7128, -74.0060);
        let b = p(51.5074, -0.1278);
        let m = interpolate(a, b, 0.5);
        let da = distance_miles(a, m);
        let db = distance_miles(m, b);
        assert!((da - db).abs() < 1e-6);
        // Great circle bows north of the straight lat/lng midpoint
        assert!(m.lat() > (a.lat() + b.lat()) / 2.0);
    }

    #[test]
    fn test_antipodal_falls_back_to_blend() {
        let m = interpolate(p(0.0, 0.0), p(0.0, 180.0), 0.5);
        assert!(m.lat().abs() < 1e-9);
        assert!((m.lng() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_path_length() {
        let a = p(40.7128, -74.0060);
        let b = p(40.7300, -73.9352);
        let path = great_circle_path(a, b, 8);
        assert_eq!(path.len(), 9);
        assert_eq!(path[0], a);
        assert_eq!(path[8], b);

        let total: f64 = path.windows(2).map(|w| distance_miles(w[0], w[1])).sum();
        assert!((total - distance_miles(a, b)).abs() < 1e-6);
    }

    #[test]
    fn test_zero_segments() {
        let a = p(1.0, 1.0);
        let b = p(2.0, 2.0);
        assert_eq!(great_circle_path(a, b, 0), vec![a, b]);
    }

    #[test]
    fn test_identical_endpoints() {
        let a = p(1.0, 1.0);
        let path = great_circle_path(a, a, 4);
        assert_eq!(path.len(), 5);
        assert!(path.iter().all(|q| *q == a));
    }
}
