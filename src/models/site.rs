//! Site model.
//!
//! A site is a location that needs coverage: a patient home, a trial site,
//! or a candidate site under evaluation. Each site carries at most one
//! assigned resource.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::GeoPoint;

/// A location requiring a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Unique site identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Site coordinates.
    pub location: GeoPoint,
    /// Site classification (drives ordering priority and marker style).
    pub category: SiteCategory,
    /// Capability tags a resource must carry to serve this site.
    pub required_capabilities: Vec<String>,
    /// Currently assigned resource ID. `None` = unassigned.
    pub assigned_resource: Option<String>,
    /// Domain-specific metadata.
    pub attributes: HashMap<String, String>,
}

/// Site classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SiteCategory {
    /// A participant's home (remote visit).
    PatientHome,
    /// An active trial location.
    TrialSite,
    /// A location being evaluated for a future trial.
    CandidateSite,
    /// Domain-specific category.
    Custom(String),
}

impl SiteCategory {
    /// Service priority (lower = served first under category ordering).
    pub fn priority(&self) -> u8 {
        match self {
            SiteCategory::PatientHome => 0,
            SiteCategory::TrialSite => 1,
            SiteCategory::CandidateSite => 2,
            SiteCategory::Custom(_) => 3,
        }
    }

    /// Display label.
    pub fn label(&self) -> &str {
        match self {
            SiteCategory::PatientHome => "Patient Home",
            SiteCategory::TrialSite => "Trial Site",
            SiteCategory::CandidateSite => "Candidate Site",
            SiteCategory::Custom(name) => name.as_str(),
        }
    }
}

impl Site {
    /// Creates an unassigned site.
    pub fn new(id: impl Into<String>, location: GeoPoint, category: SiteCategory) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            location,
            category,
            required_capabilities: Vec::new(),
            assigned_resource: None,
            attributes: HashMap::new(),
        }
    }

    /// Creates a patient-home site.
    pub fn patient_home(id: impl Into<String>, location: GeoPoint) -> Self {
        Self::new(id, location, SiteCategory::PatientHome)
    }

    /// Creates a trial site.
    pub fn trial_site(id: impl Into<String>, location: GeoPoint) -> Self {
        Self::new(id, location, SiteCategory::TrialSite)
    }

    /// Creates a candidate site.
    pub fn candidate_site(id: impl Into<String>, location: GeoPoint) -> Self {
        Self::new(id, location, SiteCategory::CandidateSite)
    }

    /// Sets the site name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a required capability.
    pub fn with_requirement(mut self, capability: impl Into<String>) -> Self {
        self.required_capabilities.push(capability.into());
        self
    }

    /// Sets the assigned resource.
    pub fn with_assigned(mut self, resource_id: impl Into<String>) -> Self {
        self.assigned_resource = Some(resource_id.into());
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Whether a resource is assigned.
    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.assigned_resource.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nyc() -> GeoPoint {
        GeoPoint::new(40.7128, -74.0060).unwrap()
    }

    #[test]
    fn test_site_builder() {
        let s = Site::patient_home("S1", nyc())
            .with_name("Home visit, Tribeca")
            .with_requirement("phlebotomy")
            .with_attribute("borough", "Manhattan");

        assert_eq!(s.id, "S1");
        assert_eq!(s.category, SiteCategory::PatientHome);
        assert_eq!(s.required_capabilities, vec!["phlebotomy".to_string()]);
        assert!(!s.is_assigned());
        assert_eq!(s.attributes["borough"], "Manhattan");
    }

    #[test]
    fn test_with_assigned() {
        let s = Site::trial_site("S2", nyc()).with_assigned("N1");
        assert!(s.is_assigned());
        assert_eq!(s.assigned_resource.as_deref(), Some("N1"));
    }

    #[test]
    fn test_category_priority_order() {
        assert!(SiteCategory::PatientHome.priority() < SiteCategory::TrialSite.priority());
        assert!(SiteCategory::TrialSite.priority() < SiteCategory::CandidateSite.priority());
        assert!(
            SiteCategory::CandidateSite.priority()
                < SiteCategory::Custom("Depot".into()).priority()
        );
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(SiteCategory::PatientHome.label(), "Patient Home");
        assert_eq!(SiteCategory::Custom("Depot".into()).label(), "Depot");
    }
}
