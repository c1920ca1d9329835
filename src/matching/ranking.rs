//! Top-K nearest recommendation query.

use serde::Serialize;

use super::Matcher;
use crate::geo::distance_miles;
use crate::models::{Resource, Site};

/// A resource paired with its distance to a site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedResource<'a> {
    /// The candidate resource.
    pub resource: &'a Resource,
    /// Distance to the site (miles).
    pub distance_miles: f64,
}

/// The `k` nearest non-`Unavailable` resources to `site`, nearest first.
///
/// The sort is stable: resources at equal distance keep slice order.
/// Returns `min(k, eligible)` entries. Capabilities and assignments are
/// not considered, so for a site with requirements the first entry may be
/// a resource `nearest_available` would skip. `Matcher::recommend` applies
/// the same filter as matching.
///
/// # Example
/// ```
/// use site_match::matching::top_k_nearest;
/// use site_match::models::{GeoPoint, Resource, Site};
///
/// let p = |lat, lng| GeoPoint::new(lat, lng).unwrap();
/// let site = Site::trial_site("S1", p(0.0, 0.0));
/// let resources = vec![
///     Resource::available("FAR", p(0.0, 0.3)),
///     Resource::unavailable("OFF", p(0.0, 0.05)),
///     Resource::limited("NEAR", p(0.0, 0.1)),
/// ];
/// let top = top_k_nearest(&site, &resources, 3);
/// let ids: Vec<&str> = top.iter().map(|r| r.resource.id.as_str()).collect();
/// assert_eq!(ids, vec!["NEAR", "FAR"]);
/// ```
pub fn top_k_nearest<'r>(
    site: &Site,
    resources: &'r [Resource],
    k: usize,
) -> Vec<RankedResource<'r>> {
    rank(site, resources, k, |r, _| r.is_assignable())
}

impl Matcher {
    /// The `k` nearest resources passing this matcher's eligibility filter.
    ///
    /// Resources already serving other sites are still listed; a
    /// recommendation is a suggestion for a manual override.
    pub fn recommend<'r>(
        &self,
        site: &Site,
        resources: &'r [Resource],
        k: usize,
    ) -> Vec<RankedResource<'r>> {
        let eligibility = *self.eligibility();
        rank(site, resources, k, |r, d| eligibility.admits(site, r, d))
    }
}

fn rank<'r, F>(
    site: &Site,
    resources: &'r [Resource],
    k: usize,
    eligible: F,
) -> Vec<RankedResource<'r>>
where
    F: Fn(&Resource, f64) -> bool,
{
    if k == 0 {
        return Vec::new();
    }
    let mut ranked: Vec<RankedResource<'r>> = resources
        .iter()
        .map(|resource| RankedResource {
            resource,
            distance_miles: distance_miles(site.location, resource.location),
        })
        .filter(|r| eligible(r.resource, r.distance_miles))
        .collect();

    // `sort_by` is stable; equal distances keep slice order.
    ranked.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
    ranked.truncate(k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchConfig;
    use crate::models::GeoPoint;

    fn p(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).unwrap()
    }

    fn site() -> Site {
        Site::trial_site("S1", p(0.0, 0.0))
    }

    fn pool() -> Vec<Resource> {
        vec![
            Resource::available("D4", p(0.0, 0.4)),
            Resource::available("D1", p(0.0, 0.1)),
            Resource::unavailable("U0", p(0.0, 0.0)),
            Resource::limited("D3", p(0.0, 0.3)),
            Resource::available("D2", p(0.0, 0.2)),
        ]
    }

    fn ids(ranked: &[RankedResource<'_>]) -> Vec<String> {
        ranked.iter().map(|r| r.resource.id.clone()).collect()
    }

    #[test]
    fn test_top_three_ascending() {
        let resources = pool();
        let top = top_k_nearest(&site(), &resources, 3);
        assert_eq!(ids(&top), vec!["D1", "D2", "D3"]);
        assert!(top.windows(2).all(|w| w[0].distance_miles <= w[1].distance_miles));
    }

    #[test]
    fn test_length_is_min_of_k_and_eligible() {
        let resources = pool();
        assert_eq!(top_k_nearest(&site(), &resources, 10).len(), 4);
        assert_eq!(top_k_nearest(&site(), &resources, 2).len(), 2);
        assert!(top_k_nearest(&site(), &resources, 0).is_empty());
        assert!(top_k_nearest(&site(), &[], 3).is_empty());
    }

    #[test]
    fn test_excludes_unavailable() {
        let resources = pool();
        let top = top_k_nearest(&site(), &resources, 10);
        assert!(top.iter().all(|r| r.resource.id != "U0"));
    }

    #[test]
    fn test_stable_for_equal_distances() {
        // North, east, south, west at equal distance
        let resources = vec![
            Resource::available("N", p(0.1, 0.0)),
            Resource::available("E", p(0.0, 0.1)),
            Resource::available("S", p(-0.1, 0.0)),
            Resource::available("W", p(0.0, -0.1)),
        ];
        let top = top_k_nearest(&site(), &resources, 4);
        assert_eq!(ids(&top), vec!["N", "E", "S", "W"]);
    }

    #[test]
    fn test_capability_filter_differs_from_matching() {
        let resources = vec![
            Resource::available("N1", p(0.0, 0.1)),
            Resource::available("N2", p(0.0, 0.2)).with_capability("pediatrics"),
        ];
        let picky = site().with_requirement("pediatrics");
        let none = std::collections::HashSet::new();
        let matched = crate::matching::nearest_available(&picky, &resources, &none);
        assert_eq!(matched.map(|r| r.id.as_str()), Some("N2"));

        assert_eq!(top_k_nearest(&picky, &resources, 1)[0].resource.id, "N1");
        assert_eq!(Matcher::new().recommend(&picky, &resources, 1)[0].resource.id, "N2");
    }

    #[test]
    fn test_recommend_applies_eligibility() {
        let resources = vec![
            Resource::available("N1", p(0.0, 0.1)),
            Resource::available("N2", p(0.0, 0.2)).with_capability("pediatrics"),
            Resource::available("N3", p(0.0, 2.0)).with_capability("pediatrics"),
        ];
        let picky = site().with_requirement("pediatrics");

        let matcher = Matcher::new();
        assert_eq!(ids(&matcher.recommend(&picky, &resources, 3)), vec!["N2", "N3"]);

        let radius = Matcher::from_config(MatchConfig::default().with_max_distance(50.0));
        assert_eq!(ids(&radius.recommend(&picky, &resources, 3)), vec!["N2"]);
    }
}
