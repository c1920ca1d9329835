//! Built-in site ordering rules.
//!
//! # Score Convention
//! All rules return lower scores for sites that should be matched first.

use super::{RuleScore, SiteRule};
use crate::models::Site;

/// Category priority.
///
/// Patient homes before trial sites before candidate sites, then custom
/// categories. See `SiteCategory::priority`.
#[derive(Debug, Clone, Copy)]
pub struct CategoryPriority;

impl SiteRule for CategoryPriority {
    fn name(&self) -> &'static str {
        "CATEGORY"
    }

    fn evaluate(&self, site: &Site) -> RuleScore {
        site.category.priority() as f64
    }

    fn description(&self) -> &'static str {
        "Category Priority"
    }
}

/// Most Constrained First.
///
/// Sites with more required capabilities pick first, since fewer resources
/// can serve them.
#[derive(Debug, Clone, Copy)]
pub struct MostConstrained;

impl SiteRule for MostConstrained {
    fn name(&self) -> &'static str {
        "MCF"
    }

    fn evaluate(&self, site: &Site) -> RuleScore {
        -(site.required_capabilities.len() as f64)
    }

    fn description(&self) -> &'static str {
        "Most Constrained First"
    }
}
