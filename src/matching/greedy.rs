//! Greedy nearest-available-resource matcher.
//!
//! # Algorithm
//!
//! 1. Mark every resource already bound to a site (in the batch or in the
//!    existing assignment set) as consumed.
//! 2. Visit sites in order (caller order, or the configured `SiteOrdering`).
//! 3. Skip sites that already have a resource.
//! 4. Among eligible, unconsumed resources pick the one with the smallest
//!    Haversine distance; the first one in resource order wins ties.
//! 5. Record the assignment and consume the resource, or record the site
//!    as unassigned when nothing eligible is left.
//!
//! No backtracking and no global optimisation.
//!
//! # Complexity
//! O(s · r) where s = sites, r = resources.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use super::ranking::RankedResource;
use super::{rules, SiteOrdering};
use crate::config::{MatchConfig, SiteOrder};
use crate::geo::distance_miles;
use crate::models::{Assignment, AssignmentSet, Resource, Site};

/// Resource eligibility filter.
///
/// A resource is eligible for a site when it is not `Unavailable`, carries
/// the site's required capabilities (when enforced), and lies within the
/// service radius (when set).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eligibility {
    /// Enforce `Site::required_capabilities`.
    pub require_capabilities: bool,
    /// Service radius in miles.
    pub max_distance_miles: Option<f64>,
}

impl Default for Eligibility {
    fn default() -> Self {
        Self {
            require_capabilities: true,
            max_distance_miles: None,
        }
    }
}

impl Eligibility {
    /// Derives the filter from a config.
    pub fn from_config(config: &MatchConfig) -> Self {
        Self {
            require_capabilities: config.require_capabilities,
            max_distance_miles: config.max_distance_miles,
        }
    }

    /// Whether `resource` may serve `site` at the given distance.
    pub fn admits(&self, site: &Site, resource: &Resource, distance_miles: f64) -> bool {
        if !resource.is_assignable() {
            return false;
        }
        if self.require_capabilities
            && !resource.has_all_capabilities(site.required_capabilities.as_slice())
        {
            return false;
        }
        match self.max_distance_miles {
            Some(radius) => distance_miles <= radius,
            None => true,
        }
    }
}

/// Result of one matching pass.
///
/// Holds only what the pass produced; inputs are never mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOutcome {
    /// New assignments, in processing order.
    pub assignments: Vec<Assignment>,
    /// Sites left without a resource, in processing order.
    pub unassigned: Vec<String>,
    /// Sites skipped because they already had a resource.
    pub already_assigned: Vec<String>,
}

impl MatchOutcome {
    /// New assignments as `site_id → resource_id`.
    pub fn to_map(&self) -> HashMap<String, String> {
        self.assignments
            .iter()
            .map(|a| (a.site_id.clone(), a.resource_id.clone()))
            .collect()
    }

    /// The resource assigned to a site in this pass.
    pub fn resource_for(&self, site_id: &str) -> Option<&str> {
        self.assignments
            .iter()
            .find(|a| a.site_id == site_id)
            .map(|a| a.resource_id.as_str())
    }

    /// Number of sites assigned in this pass.
    pub fn assigned_count(&self) -> usize {
        self.assignments.len()
    }

    /// Whether every site needing a resource got one.
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }

    /// Whether the pass changed nothing.
    pub fn is_noop(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Adds this pass's assignments to a set.
    pub fn merge_into(&self, set: &mut AssignmentSet) {
        set.extend(self.assignments.iter().cloned());
    }

    /// Copies of `sites` with this pass's assignments filled in.
    pub fn apply_to(&self, sites: &[Site]) -> Vec<Site> {
        let map = self.to_map();
        sites
            .iter()
            .map(|s| match map.get(&s.id) {
                Some(resource_id) if !s.is_assigned() => s.clone().with_assigned(resource_id),
                _ => s.clone(),
            })
            .collect()
    }
}

/// Configurable greedy matcher.
///
/// # Example
///
/// ```
/// use site_match::config::{MatchConfig, SiteOrder};
/// use site_match::matching::Matcher;
/// use site_match::models::{AssignmentSet, GeoPoint, Resource, Site};
///
/// let p = |lat, lng| GeoPoint::new(lat, lng).unwrap();
/// let sites = vec![
///     Site::trial_site("T1", p(40.70, -74.00)),
///     Site::patient_home("H1", p(40.70, -74.00)),
/// ];
/// let resources = vec![Resource::available("N1", p(40.71, -74.00))];
///
/// let matcher = Matcher::from_config(
///     MatchConfig::default().with_site_order(SiteOrder::CategoryPriority),
/// );
/// let outcome = matcher.run(&sites, &resources, &AssignmentSet::new());
/// assert_eq!(outcome.resource_for("H1"), Some("N1"));
/// assert_eq!(outcome.unassigned, vec!["T1".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    ordering: SiteOrdering,
    eligibility: Eligibility,
}

impl Matcher {
    /// Creates a matcher with input ordering and default eligibility.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a matcher from a config.
    pub fn from_config(config: MatchConfig) -> Self {
        let ordering = match config.site_order {
            SiteOrder::Input => SiteOrdering::new(),
            SiteOrder::CategoryPriority => SiteOrdering::new().with_rule(rules::CategoryPriority),
        };
        Self {
            ordering,
            eligibility: Eligibility::from_config(&config),
        }
    }

    /// Sets the site ordering.
    pub fn with_ordering(mut self, ordering: SiteOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    /// Sets the eligibility filter.
    pub fn with_eligibility(mut self, eligibility: Eligibility) -> Self {
        self.eligibility = eligibility;
        self
    }

    /// The eligibility filter in use.
    pub fn eligibility(&self) -> &Eligibility {
        &self.eligibility
    }

    /// Nearest eligible resource not in `excluded`.
    ///
    /// Ties go to the first resource in slice order.
    pub fn nearest<'r>(
        &self,
        site: &Site,
        resources: &'r [Resource],
        excluded: &HashSet<&str>,
    ) -> Option<RankedResource<'r>> {
        let mut best: Option<RankedResource<'r>> = None;
        for resource in resources {
            if excluded.contains(resource.id.as_str()) {
                continue;
            }
            let d = distance_miles(site.location, resource.location);
            if !self.eligibility.admits(site, resource, d) {
                continue;
            }
            // Strict comparison keeps the first minimum.
            if best.as_ref().map_or(true, |b| d < b.distance_miles) {
                best = Some(RankedResource {
                    resource,
                    distance_miles: d,
                });
            }
        }
        best
    }

    /// Runs one greedy pass.
    ///
    /// `existing` holds assignments made elsewhere (including sites outside
    /// this batch); its sites are skipped and its resources are excluded.
    pub fn run(
        &self,
        sites: &[Site],
        resources: &[Resource],
        existing: &AssignmentSet,
    ) -> MatchOutcome {
        let mut consumed: HashSet<&str> = existing.resource_ids();
        consumed.extend(sites.iter().filter_map(|s| s.assigned_resource.as_deref()));

        let mut outcome = MatchOutcome::default();
        let mut visited: HashSet<&str> = HashSet::new();

        for idx in self.ordering.sort_indices(sites) {
            let site = &sites[idx];
            if !visited.insert(site.id.as_str()) {
                continue;
            }
            if site.is_assigned() || existing.is_site_assigned(&site.id) {
                trace!(site = %site.id, "site already assigned, skipping");
                outcome.already_assigned.push(site.id.clone());
                continue;
            }

            match self.nearest(site, resources, &consumed) {
                Some(best) => {
                    trace!(
                        site = %site.id,
                        resource = %best.resource.id,
                        distance_miles = best.distance_miles,
                        "matched site"
                    );
                    consumed.insert(best.resource.id.as_str());
                    outcome.assignments.push(Assignment::matched(
                        &site.id,
                        &best.resource.id,
                        best.distance_miles,
                    ));
                }
                None => {
                    trace!(site = %site.id, "no eligible resource left");
                    outcome.unassigned.push(site.id.clone());
                }
            }
        }

        debug!(
            sites = sites.len(),
            resources = resources.len(),
            assigned = outcome.assignments.len(),
            unassigned = outcome.unassigned.len(),
            skipped = outcome.already_assigned.len(),
            "greedy matching pass complete"
        );
        outcome
    }
}

/// Nearest non-`Unavailable` resource to `site` that is not in `excluded`.
///
/// Uses default eligibility (site capability requirements enforced, no
/// radius). Ties go to the first resource in slice order.
///
/// `top_k_nearest` does not check capabilities, so for a site with
/// requirements its first entry can differ from this result. Use
/// `Matcher::recommend` for a ranking that agrees with matching.
pub fn nearest_available<'r>(
    site: &Site,
    resources: &'r [Resource],
    excluded: &HashSet<&str>,
) -> Option<&'r Resource> {
    Matcher::new()
        .nearest(site, resources, excluded)
        .map(|r| r.resource)
}

/// Greedily assigns each unassigned site, in order, to its nearest
/// remaining eligible resource.
///
/// Resources already bound to any site in `sites` are excluded. Sites that
/// cannot be served are listed in `MatchOutcome::unassigned`. Capability
/// requirements are enforced, as in `nearest_available`.
pub fn greedy_match(sites: &[Site], resources: &[Resource]) -> MatchOutcome {
    Matcher::new().run(sites, resources, &AssignmentSet::new())
}
