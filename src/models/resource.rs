//! Resource model.
//!
//! Resources are the mobile agents that cover sites: nurses, coordinators,
//! couriers. Each resource has a location, an availability state, and a
//! set of capability tags. A resource may serve several sites.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::GeoPoint;

/// A resource that can be assigned to sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Current location.
    pub location: GeoPoint,
    /// Availability state.
    pub availability: Availability,
    /// Capability tags (e.g., "phlebotomy", "spanish", "pediatrics").
    pub capabilities: BTreeSet<String>,
    /// Domain-specific metadata.
    pub attributes: HashMap<String, String>,
}

/// Availability state of a resource.
///
/// `Limited` resources remain eligible for matching; only `Unavailable`
/// ones are excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    /// Free to take new sites.
    Available,
    /// Reduced capacity, still assignable.
    Limited,
    /// Not assignable.
    Unavailable,
}

impl Availability {
    /// Whether this state allows new assignments.
    #[inline]
    pub fn is_assignable(self) -> bool {
        !matches!(self, Availability::Unavailable)
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::Limited => "Limited",
            Availability::Unavailable => "Unavailable",
        }
    }
}

impl Resource {
    /// Creates a new resource.
    pub fn new(id: impl Into<String>, location: GeoPoint, availability: Availability) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            location,
            availability,
            capabilities: BTreeSet::new(),
            attributes: HashMap::new(),
        }
    }

    /// Creates an available resource.
    pub fn available(id: impl Into<String>, location: GeoPoint) -> Self {
        Self::new(id, location, Availability::Available)
    }

    /// Creates a resource with limited availability.
    pub fn limited(id: impl Into<String>, location: GeoPoint) -> Self {
        Self::new(id, location, Availability::Limited)
    }

    /// Creates an unavailable resource.
    pub fn unavailable(id: impl Into<String>, location: GeoPoint) -> Self {
        Self::new(id, location, Availability::Unavailable)
    }

    /// Sets the resource name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a capability tag.
    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.insert(capability.into());
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Whether this resource carries a capability tag.
    pub fn has_capability(&self, name: &str) -> bool {
        self.capabilities.contains(name)
    }

    /// Whether this resource carries every listed capability.
    pub fn has_all_capabilities<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required.iter().all(|c| self.has_capability(c.as_ref()))
    }

    /// Whether this resource may take new assignments.
    #[inline]
    pub fn is_assignable(&self) -> bool {
        self.availability.is_assignable()
    }
}
