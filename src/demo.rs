//! Demo dataset.
//!
//! A fixed New York City scenario for walkthroughs and tests, plus a seeded
//! generator for larger synthetic resource pools.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::geo::EARTH_RADIUS_MILES;
use crate::models::{Availability, GeoPoint, Resource, Site};

// Fixture literals only; all are well inside range.
fn at(lat: f64, lng: f64) -> GeoPoint {
    GeoPoint::from_trusted(lat, lng)
}

fn wrap_lng(lng: f64) -> f64 {
    (lng + 180.0).rem_euclid(360.0) - 180.0
}

/// Sites across Manhattan, Brooklyn, and Queens.
pub fn sample_sites() -> Vec<Site> {
    vec![
        Site::patient_home("home-tribeca", at(40.7163, -74.0086))
            .with_name("Home visit: Tribeca")
            .with_requirement("phlebotomy"),
        Site::patient_home("home-astoria", at(40.7644, -73.9235)).with_name("Home visit: Astoria"),
        Site::trial_site("trial-nyu", at(40.7421, -73.9739))
            .with_name("NYU Langone Clinical Research"),
        Site::trial_site("trial-mount-sinai", at(40.7900, -73.9526))
            .with_name("Mount Sinai Trial Unit"),
        Site::candidate_site("candidate-williamsburg", at(40.7081, -73.9571))
            .with_name("Candidate: Williamsburg Clinic"),
        Site::candidate_site("candidate-flushing", at(40.7580, -73.8303))
            .with_name("Candidate: Flushing Health Center")
            .with_requirement("mandarin"),
    ]
}

/// Nurses with mixed availability and capabilities.
pub fn sample_resources() -> Vec<Resource> {
    vec![
        Resource::available("nurse-ortiz", at(40.7128, -74.0060))
            .with_name("Dana Ortiz, RN")
            .with_capability("phlebotomy")
            .with_capability("spanish"),
        Resource::available("nurse-chen", at(40.7527, -73.8370))
            .with_name("Wei Chen, RN")
            .with_capability("mandarin"),
        Resource::limited("nurse-okafor", at(40.7306, -73.9866))
            .with_name("Ada Okafor, RN")
            .with_capability("phlebotomy"),
        Resource::unavailable("nurse-murphy", at(40.7794, -73.9632)).with_name("Sean Murphy, RN"),
        Resource::available("nurse-patel", at(40.7300, -73.9352))
            .with_name("Priya Patel, RN")
            .with_capability("pediatrics"),
        Resource::unavailable("nurse-kowalski", at(40.7690, -73.9190))
            .with_name("Ola Kowalski, RN"),
        Resource::available("nurse-haddad", at(40.7851, -73.9683)).with_name("Lina Haddad, RN"),
    ]
}

/// Generates `count` resources scattered within about `radius_miles` of
/// `center`, reproducibly for a given `seed`.
///
/// Roughly 20% are `Unavailable` and 20% `Limited`. Longitudes wrap across
/// the antimeridian; latitudes past a pole are clamped. Fails with
/// `Error::Config` if `radius_miles` is negative or not finite.
pub fn scatter_resources(
    seed: u64,
    center: GeoPoint,
    count: usize,
    radius_miles: f64,
) -> Result<Vec<Resource>> {
    if !radius_miles.is_finite() || radius_miles < 0.0 {
        return Err(Error::Config(format!(
            "scatter radius must be finite and non-negative, got {radius_miles}"
        )));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let miles_per_deg_lat = EARTH_RADIUS_MILES.to_radians();
    let miles_per_deg_lng = (miles_per_deg_lat * center.lat_rad().cos()).max(1e-6);

    (0..count)
        .map(|i| {
            // sqrt keeps the density uniform over the disc
            let r = radius_miles * rng.random::<f64>().sqrt();
            let theta = rng.random_range(0.0..std::f64::consts::TAU);
            let lat = center.lat() + r * theta.cos() / miles_per_deg_lat;
            let lng = center.lng() + r * theta.sin() / miles_per_deg_lng;

            let availability = match rng.random_range(0..10) {
                0 | 1 => Availability::Unavailable,
                2 | 3 => Availability::Limited,
                _ => Availability::Available,
            };
            GeoPoint::clamped(lat, wrap_lng(lng))
                .map(|location| Resource::new(format!("R{i:03}"), location, availability))
        })
        .collect()
}
