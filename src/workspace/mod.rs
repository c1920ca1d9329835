//! Matching workspace.
//!
//! Owns the sites, resources, and assignment relation for one session and
//! exposes the operations a map UI drives: auto-match, manual override,
//! unassign, recommendations, marker sync, and flow paths. Every method
//! runs to completion synchronously; wrap the workspace in whatever lock
//! your concurrency model needs.
//!
//! # Example
//!
//! ```
//! use site_match::models::{GeoPoint, Resource, Site};
//! use site_match::workspace::Workspace;
//!
//! let p = |lat, lng| GeoPoint::new(lat, lng).unwrap();
//! let mut ws = Workspace::new(
//!     vec![Site::patient_home("S1", p(40.71, -74.00))],
//!     vec![Resource::available("N1", p(40.72, -74.01))],
//! );
//!
//! let outcome = ws.auto_match();
//! assert_eq!(outcome.assigned_count(), 1);
//! assert_eq!(ws.summary().coverage_rate, 1.0);
//! ```

mod flow;
mod markers;

pub use flow::{flow_paths, FlowPath};
pub use markers::{
    reconcile, snapshot, Marker, MarkerCache, MarkerDiff, MarkerKey, MarkerKind, MarkerStyle,
};

use tracing::{debug, warn};

use crate::config::MatchConfig;
use crate::error::{Error, Result};
use crate::geo::distance_miles;
use crate::matching::{CoverageSummary, MatchOutcome, Matcher, RankedResource};
use crate::models::{Assignment, AssignmentSet, Availability, GeoPoint, Resource, Site};
use crate::validation::validate_input;

/// Session state for site/resource matching.
///
/// The assignment set is the single source of truth; `Site::assigned_resource`
/// on input sites is absorbed into it at construction.
#[derive(Debug, Clone)]
pub struct Workspace {
    sites: Vec<Site>,
    resources: Vec<Resource>,
    assignments: AssignmentSet,
    config: MatchConfig,
    matcher: Matcher,
    marker_cache: MarkerCache,
}

impl Workspace {
    /// Creates a workspace with the default config.
    ///
    /// Pre-assigned sites become manual assignments. References to unknown
    /// or `Unavailable` resources are dropped; use `try_new` to reject them
    /// instead.
    pub fn new(mut sites: Vec<Site>, resources: Vec<Resource>) -> Self {
        let config = MatchConfig::default();
        let matcher = Matcher::from_config(config.clone());
        let mut assignments = AssignmentSet::new();

        for site in &mut sites {
            let Some(resource_id) = site.assigned_resource.take() else {
                continue;
            };
            match resources.iter().find(|r| r.id == resource_id) {
                Some(r) if r.is_assignable() => {
                    let d = distance_miles(site.location, r.location);
                    assignments.assign(Assignment::manual(&site.id, resource_id, d));
                }
                Some(_) => warn!(
                    site = %site.id,
                    resource = %resource_id,
                    "dropping assignment to unavailable resource"
                ),
                None => warn!(
                    site = %site.id,
                    resource = %resource_id,
                    "dropping assignment to unknown resource"
                ),
            }
        }

        Self {
            sites,
            resources,
            assignments,
            config,
            matcher,
            marker_cache: MarkerCache::new(),
        }
    }

    /// Validates input, then creates a workspace with `config`.
    pub fn try_new(
        sites: Vec<Site>,
        resources: Vec<Resource>,
        config: MatchConfig,
    ) -> Result<Self> {
        validate_input(&sites, &resources).map_err(Error::Validation)?;
        Self::new(sites, resources).with_config(config)
    }

    /// Replaces the config.
    pub fn with_config(mut self, config: MatchConfig) -> Result<Self> {
        config.validate()?;
        self.matcher = Matcher::from_config(config.clone());
        self.config = config;
        Ok(self)
    }

    /// Runs a greedy pass over unassigned sites and keeps the result.
    pub fn auto_match(&mut self) -> MatchOutcome {
        let outcome = self
            .matcher
            .run(&self.sites, &self.resources, &self.assignments);
        outcome.merge_into(&mut self.assignments);
        debug!(
            assigned = outcome.assigned_count(),
            unassigned = outcome.unassigned.len(),
            total_assigned = self.assignments.len(),
            "auto-match applied"
        );
        outcome
    }

    /// Assigns `resource_id` to `site_id`, replacing any current assignment.
    ///
    /// A manual override may reuse a resource that already serves other
    /// sites. Returns the replaced assignment.
    pub fn assign_manual(
        &mut self,
        site_id: &str,
        resource_id: &str,
    ) -> Result<Option<Assignment>> {
        let site = self.site(site_id).ok_or_else(|| Error::UnknownSite(site_id.into()))?;
        let resource = self
            .resource(resource_id)
            .ok_or_else(|| Error::UnknownResource(resource_id.into()))?;
        if !resource.is_assignable() {
            return Err(Error::ResourceUnavailable(resource_id.into()));
        }

        let d = distance_miles(site.location, resource.location);
        let previous = self
            .assignments
            .assign(Assignment::manual(site_id, resource_id, d));
        match &previous {
            Some(old) => warn!(
                site = site_id,
                from = %old.resource_id,
                to = resource_id,
                "manual override replaced assignment"
            ),
            None => debug!(site = site_id, resource = resource_id, "manual assignment"),
        }
        Ok(previous)
    }

    /// Clears a site's assignment. Returns the removed assignment, if any.
    pub fn unassign(&mut self, site_id: &str) -> Result<Option<Assignment>> {
        if self.site(site_id).is_none() {
            return Err(Error::UnknownSite(site_id.into()));
        }
        let removed = self.assignments.unassign(site_id);
        debug!(site = site_id, removed = removed.is_some(), "unassign");
        Ok(removed)
    }

    /// Removes every assignment.
    pub fn clear_assignments(&mut self) {
        debug!(cleared = self.assignments.len(), "clearing assignments");
        self.assignments.clear();
    }

    /// Changes a resource's availability.
    ///
    /// Making a resource `Unavailable` releases the sites it served; the
    /// released assignments are returned.
    pub fn set_availability(
        &mut self,
        resource_id: &str,
        availability: Availability,
    ) -> Result<Vec<Assignment>> {
        let resource = self
            .resources
            .iter_mut()
            .find(|r| r.id == resource_id)
            .ok_or_else(|| Error::UnknownResource(resource_id.into()))?;
        resource.availability = availability;

        if availability.is_assignable() {
            return Ok(Vec::new());
        }
        let released: Vec<Assignment> = self
            .assignments
            .for_resource(resource_id)
            .into_iter()
            .cloned()
            .collect();
        for a in &released {
            self.assignments.unassign(&a.site_id);
        }
        debug!(resource = resource_id, released = released.len(), "resource made unavailable");
        Ok(released)
    }

    /// Moves a resource and refreshes the distances of its assignments.
    pub fn move_resource(&mut self, resource_id: &str, location: GeoPoint) -> Result<()> {
        let resource = self
            .resources
            .iter_mut()
            .find(|r| r.id == resource_id)
            .ok_or_else(|| Error::UnknownResource(resource_id.into()))?;
        resource.location = location;

        let refreshed: Vec<Assignment> = self
            .assignments
            .for_resource(resource_id)
            .into_iter()
            .filter_map(|a| {
                let site = self.sites.iter().find(|s| s.id == a.site_id)?;
                Some(Assignment {
                    distance_miles: distance_miles(site.location, location),
                    ..a.clone()
                })
            })
            .collect();
        self.assignments.extend(refreshed);
        Ok(())
    }

    /// Top-K recommendations for a site, using the configured K and filters.
    pub fn recommendations(&self, site_id: &str) -> Result<Vec<RankedResource<'_>>> {
        let site = self.site(site_id).ok_or_else(|| Error::UnknownSite(site_id.into()))?;
        Ok(self
            .matcher
            .recommend(site, &self.resources, self.config.recommendation_count))
    }

    /// Current marker snapshot.
    pub fn markers(&self) -> Vec<Marker> {
        snapshot(&self.sites, &self.resources, &self.assignments)
    }

    /// Diffs the current snapshot against the last synced one.
    pub fn sync_markers(&mut self) -> MarkerDiff {
        let next = self.markers();
        let diff = self.marker_cache.sync(next);
        if !diff.is_empty() {
            debug!(
                added = diff.added.len(),
                removed = diff.removed.len(),
                moved = diff.moved.len(),
                restyled = diff.restyled.len(),
                "markers reconciled"
            );
        }
        diff
    }

    /// Flow paths for every current assignment.
    pub fn flow_paths(&self) -> Vec<FlowPath> {
        flow_paths(
            &self.sites,
            &self.resources,
            &self.assignments,
            self.config.flow_path_segments,
        )
    }

    /// Coverage metrics over all sites.
    pub fn summary(&self) -> CoverageSummary {
        CoverageSummary::calculate(&self.sites, &self.assignments)
    }

    /// Sites with `assigned_resource` filled from the assignment set.
    pub fn sites_view(&self) -> Vec<Site> {
        self.sites
            .iter()
            .map(|s| match self.assignments.for_site(&s.id) {
                Some(a) => s.clone().with_assigned(&a.resource_id),
                None => s.clone(),
            })
            .collect()
    }

    pub fn site(&self, id: &str) -> Option<&Site> {
        self.sites.iter().find(|s| s.id == id)
    }

    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn assignments(&self) -> &AssignmentSet {
        &self.assignments
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }
}
