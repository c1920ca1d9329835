//! Map marker snapshots and reconciliation.
//!
//! A renderer keeps one marker per site and per resource. After each
//! workspace change it asks for the difference between what it drew and
//! what it should draw, instead of tearing every marker down.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{AssignmentSet, Availability, GeoPoint, Resource, Site, SiteCategory};

/// What a marker represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MarkerKind {
    Site,
    Resource,
}

/// Marker identity: kind plus entity ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MarkerKey {
    pub kind: MarkerKind,
    pub id: String,
}

/// Visual state of a marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MarkerStyle {
    /// Site pin, colored by category, filled when covered.
    Site {
        category: SiteCategory,
        assigned: bool,
    },
    /// Resource pin, colored by availability, ringed when serving a site.
    Resource {
        availability: Availability,
        busy: bool,
    },
}

/// One map marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub key: MarkerKey,
    pub position: GeoPoint,
    pub label: String,
    pub style: MarkerStyle,
}

impl Marker {
    /// Marker for a site.
    pub fn for_site(site: &Site, assigned: bool) -> Self {
        Self {
            key: MarkerKey {
                kind: MarkerKind::Site,
                id: site.id.clone(),
            },
            position: site.location,
            label: display_name(&site.name, &site.id),
            style: MarkerStyle::Site {
                category: site.category.clone(),
                assigned,
            },
        }
    }

    /// Marker for a resource.
    pub fn for_resource(resource: &Resource, busy: bool) -> Self {
        Self {
            key: MarkerKey {
                kind: MarkerKind::Resource,
                id: resource.id.clone(),
            },
            position: resource.location,
            label: display_name(&resource.name, &resource.id),
            style: MarkerStyle::Resource {
                availability: resource.availability,
                busy,
            },
        }
    }
}

fn display_name(name: &str, id: &str) -> String {
    if name.is_empty() {
        id.to_string()
    } else {
        name.to_string()
    }
}

/// Builds the marker snapshot: sites first, then resources, in slice order.
pub fn snapshot(
    sites: &[Site],
    resources: &[Resource],
    assignments: &AssignmentSet,
) -> Vec<Marker> {
    let sites = sites
        .iter()
        .map(|s| Marker::for_site(s, assignments.is_site_assigned(&s.id)));
    let resources = resources
        .iter()
        .map(|r| Marker::for_resource(r, assignments.is_resource_busy(&r.id)));
    sites.chain(resources).collect()
}

/// Changes needed to turn one marker set into another.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarkerDiff {
    /// Markers to create (in `next` order).
    pub added: Vec<Marker>,
    /// Markers to delete (in `previous` order).
    pub removed: Vec<MarkerKey>,
    /// Markers whose position changed (new state).
    pub moved: Vec<Marker>,
    /// Markers whose label or style changed (new state).
    pub restyled: Vec<Marker>,
}

impl MarkerDiff {
    /// Whether nothing changed.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.moved.is_empty()
            && self.restyled.is_empty()
    }

    /// Total number of marker operations.
    pub fn change_count(&self) -> usize {
        self.added.len() + self.removed.len() + self.moved.len() + self.restyled.len()
    }
}

/// Diffs two marker sets by key.
///
/// A marker that both moved and changed style appears in `moved` and in
/// `restyled`.
pub fn reconcile(previous: &[Marker], next: &[Marker]) -> MarkerDiff {
    let before: HashMap<&MarkerKey, &Marker> = previous.iter().map(|m| (&m.key, m)).collect();
    let after: HashMap<&MarkerKey, &Marker> = next.iter().map(|m| (&m.key, m)).collect();

    let mut diff = MarkerDiff::default();
    for marker in next {
        match before.get(&marker.key) {
            None => diff.added.push(marker.clone()),
            Some(old) => {
                if old.position != marker.position {
                    diff.moved.push(marker.clone());
                }
                if old.style != marker.style || old.label != marker.label {
                    diff.restyled.push(marker.clone());
                }
            }
        }
    }
    diff.removed = previous
        .iter()
        .filter(|m| !after.contains_key(&m.key))
        .map(|m| m.key.clone())
        .collect();
    diff
}

/// The marker set a renderer currently shows.
#[derive(Debug, Clone, Default)]
pub struct MarkerCache {
    markers: Vec<Marker>,
}

impl MarkerCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cached set and returns what changed.
    pub fn sync(&mut self, next: Vec<Marker>) -> MarkerDiff {
        let diff = reconcile(&self.markers, &next);
        self.markers = next;
        diff
    }

    /// Looks up a cached marker.
    pub fn get(&self, key: &MarkerKey) -> Option<&Marker> {
        self.markers.iter().find(|m| &m.key == key)
    }

    /// Cached markers in draw order.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
