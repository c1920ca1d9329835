//! Assignment model.
//!
//! An assignment binds one resource to one site. The `AssignmentSet` keeps
//! at most one assignment per site; a resource may appear in many.
//! Assignments live in process memory only.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A site-resource binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Covered site ID.
    pub site_id: String,
    /// Assigned resource ID.
    pub resource_id: String,
    /// Great-circle distance from resource to site (miles).
    pub distance_miles: f64,
    /// How the assignment was created.
    pub origin: AssignmentOrigin,
}

/// How an assignment came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentOrigin {
    /// Produced by the greedy matcher.
    Matched,
    /// Set by a manual override.
    Manual,
}

impl Assignment {
    /// Creates a matcher-produced assignment.
    pub fn matched(
        site_id: impl Into<String>,
        resource_id: impl Into<String>,
        distance_miles: f64,
    ) -> Self {
        Self {
            site_id: site_id.into(),
            resource_id: resource_id.into(),
            distance_miles,
            origin: AssignmentOrigin::Matched,
        }
    }

    /// Creates a manual assignment.
    pub fn manual(
        site_id: impl Into<String>,
        resource_id: impl Into<String>,
        distance_miles: f64,
    ) -> Self {
        Self {
            site_id: site_id.into(),
            resource_id: resource_id.into(),
            distance_miles,
            origin: AssignmentOrigin::Manual,
        }
    }
}

/// The assignment relation (site → resource), one entry per site.
///
/// Iteration order is insertion order; replacing a site's assignment keeps
/// its original slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentSet {
    assignments: Vec<Assignment>,
}

impl AssignmentSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a site, replacing any existing assignment for it.
    ///
    /// Returns the replaced assignment.
    pub fn assign(&mut self, assignment: Assignment) -> Option<Assignment> {
        match self
            .assignments
            .iter_mut()
            .find(|a| a.site_id == assignment.site_id)
        {
            Some(slot) => Some(std::mem::replace(slot, assignment)),
            None => {
                self.assignments.push(assignment);
                None
            }
        }
    }

    /// Removes a site's assignment.
    pub fn unassign(&mut self, site_id: &str) -> Option<Assignment> {
        let idx = self.assignments.iter().position(|a| a.site_id == site_id)?;
        Some(self.assignments.remove(idx))
    }

    /// Removes every assignment.
    pub fn clear(&mut self) {
        self.assignments.clear();
    }

    /// Finds the assignment for a site.
    pub fn for_site(&self, site_id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.site_id == site_id)
    }

    /// Returns all assignments served by a resource.
    pub fn for_resource(&self, resource_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.resource_id == resource_id)
            .collect()
    }

    /// Whether the site has an assignment.
    pub fn is_site_assigned(&self, site_id: &str) -> bool {
        self.for_site(site_id).is_some()
    }

    /// Whether the resource serves at least one site.
    pub fn is_resource_busy(&self, resource_id: &str) -> bool {
        self.assignments.iter().any(|a| a.resource_id == resource_id)
    }

    /// IDs of every resource bound to some site.
    pub fn resource_ids(&self) -> HashSet<&str> {
        self.assignments
            .iter()
            .map(|a| a.resource_id.as_str())
            .collect()
    }

    /// IDs of every assigned site, in insertion order.
    pub fn site_ids(&self) -> Vec<&str> {
        self.assignments.iter().map(|a| a.site_id.as_str()).collect()
    }

    /// Number of sites served per resource.
    pub fn load_by_resource(&self) -> BTreeMap<String, usize> {
        let mut load = BTreeMap::new();
        for a in &self.assignments {
            *load.entry(a.resource_id.clone()).or_insert(0) += 1;
        }
        load
    }

    /// Iterates assignments in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Assignment> {
        self.assignments.iter()
    }

    /// Number of assigned sites.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether no site is assigned.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

impl Extend<Assignment> for AssignmentSet {
    fn extend<I: IntoIterator<Item = Assignment>>(&mut self, iter: I) {
        for a in iter {
            self.assign(a);
        }
    }
}

impl FromIterator<Assignment> for AssignmentSet {
    fn from_iter<I: IntoIterator<Item = Assignment>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a AssignmentSet {
    type Item = &'a Assignment;
    type IntoIter = std::slice::Iter<'a, Assignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.assignments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> AssignmentSet {
        let mut s = AssignmentSet::new();
        s.assign(Assignment::matched("S1", "N1", 1.5));
        s.assign(Assignment::matched("S2", "N2", 2.0));
        s.assign(Assignment::manual("S3", "N1", 4.0));
        s
    }

    #[test]
    fn test_one_assignment_per_site() {
        let mut s = sample_set();
        let previous = s.assign(Assignment::manual("S1", "N3", 0.5));

        assert_eq!(previous.unwrap().resource_id, "N1");
        assert_eq!(s.len(), 3);
        assert_eq!(s.for_site("S1").unwrap().resource_id, "N3");
        // Slot preserved
        assert_eq!(s.site_ids(), vec!["S1", "S2", "S3"]);
    }

    #[test]
    fn test_unassign() {
        let mut s = sample_set();
        let removed = s.unassign("S2").unwrap();
        assert_eq!(removed.resource_id, "N2");
        assert!(!s.is_site_assigned("S2"));
        assert!(s.unassign("S2").is_none());
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_resource_queries() {
        let s = sample_set();
        assert_eq!(s.for_resource("N1").len(), 2);
        assert!(s.is_resource_busy("N2"));
        assert!(!s.is_resource_busy("N9"));

        let ids = s.resource_ids();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains("N1") && ids.contains("N2"));
    }

    #[test]
    fn test_load_by_resource() {
        let load = sample_set().load_by_resource();
        assert_eq!(load["N1"], 2);
        assert_eq!(load["N2"], 1);
    }

    #[test]
    fn test_from_iter_dedupes_sites() {
        let s: AssignmentSet = vec![
            Assignment::matched("S1", "N1", 1.0),
            Assignment::matched("S1", "N2", 2.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(s.len(), 1);
        assert_eq!(s.for_site("S1").unwrap().resource_id, "N2");
    }

    #[test]
    fn test_empty_set() {
        let mut s = AssignmentSet::new();
        assert!(s.is_empty());
        assert!(s.for_site("S1").is_none());
        s.clear();
        assert_eq!(s.len(), 0);
    }

    #[test]
    fn test_origin_constructors() {
        assert_eq!(Assignment::matched("S", "N", 0.0).origin, AssignmentOrigin::Matched);
        assert_eq!(Assignment::manual("S", "N", 0.0).origin, AssignmentOrigin::Manual);
    }
}
