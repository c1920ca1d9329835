//! Input validation for coverage problems.
//!
//! Checks structural integrity of sites and resources before matching.
//! Detects:
//! - Duplicate IDs
//! - Sites assigned to resources that don't exist
//! - Sites assigned to unavailable resources
//!
//! Coordinate ranges are enforced when a `GeoPoint` is built, so they are
//! not re-checked here.

use crate::models::{Resource, Site};
use std::collections::{HashMap, HashSet};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A site references a resource that doesn't exist.
    InvalidResourceReference,
    /// A site is assigned to an `Unavailable` resource.
    UnavailableAssignee,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates sites and resources.
///
/// Checks:
/// 1. No duplicate resource IDs
/// 2. No duplicate site IDs
/// 3. Every `assigned_resource` points to an existing resource
/// 4. No site is assigned to an `Unavailable` resource
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(sites: &[Site], resources: &[Resource]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut by_id: HashMap<&str, &Resource> = HashMap::new();
    for r in resources {
        if by_id.insert(r.id.as_str(), r).is_some() {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate resource ID: {}", r.id),
            ));
        }
    }

    let mut site_ids = HashSet::new();
    for site in sites {
        if !site_ids.insert(site.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate site ID: {}", site.id),
            ));
        }

        let Some(resource_id) = site.assigned_resource.as_deref() else {
            continue;
        };
        match by_id.get(resource_id) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidResourceReference,
                format!(
                    "Site '{}' references unknown resource '{}'",
                    site.id, resource_id
                ),
            )),
            Some(r) if !r.is_assignable() => errors.push(ValidationError::new(
                ValidationErrorKind::UnavailableAssignee,
                format!(
                    "Site '{}' is assigned to unavailable resource '{}'",
                    site.id, resource_id
                ),
            )),
            Some(_) => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
