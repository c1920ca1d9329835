//! Resource → site flow paths for animated map overlays.

use serde::Serialize;

use crate::geo::{great_circle_path, interpolate};
use crate::models::{Assignment, AssignmentSet, GeoPoint, Resource, Site};

/// A great-circle polyline from a resource to the site it serves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowPath {
    pub site_id: String,
    pub resource_id: String,
    pub distance_miles: f64,
    /// Resource first, site last. Never fewer than two.
    points: Vec<GeoPoint>,
}

impl FlowPath {
    /// Builds the path for an assignment.
    pub fn new(assignment: &Assignment, site: &Site, resource: &Resource, segments: usize) -> Self {
        Self {
            site_id: assignment.site_id.clone(),
            resource_id: assignment.resource_id.clone(),
            distance_miles: assignment.distance_miles,
            points: great_circle_path(resource.location, site.location, segments),
        }
    }

    /// Position of the animated head at `progress` (clamped to [0, 1]).
    pub fn point_at(&self, progress: f64) -> GeoPoint {
        let last = self.points.len() - 1;
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        let pos = progress * last as f64;
        let i = (pos.floor() as usize).min(last - 1);
        interpolate(self.points[i], self.points[i + 1], pos - i as f64)
    }

    /// Evenly spaced points, resource first, site last (at least two).
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Start of the path (resource location).
    pub fn origin(&self) -> GeoPoint {
        self.points[0]
    }

    /// End of the path (site location).
    pub fn destination(&self) -> GeoPoint {
        self.points[self.points.len() - 1]
    }
}

/// Flow paths for every assignment whose site and resource are known.
pub fn flow_paths(
    sites: &[Site],
    resources: &[Resource],
    assignments: &AssignmentSet,
    segments: usize,
) -> Vec<FlowPath> {
    assignments
        .iter()
        .filter_map(|a| {
            let site = sites.iter().find(|s| s.id == a.site_id)?;
            let resource = resources.iter().find(|r| r.id == a.resource_id)?;
            Some(FlowPath::new(a, site, resource, segments))
        })
        .collect()
}
