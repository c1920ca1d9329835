//! Nearest-available-resource matching.
//!
//! Provides the greedy site → resource matcher, the top-K recommendation
//! query, composable site ordering rules, and coverage metrics.
//!
//! # Usage
//!
//! ```
//! use site_match::matching::greedy_match;
//! use site_match::models::{GeoPoint, Resource, Site};
//!
//! let sites = vec![Site::patient_home("S1", GeoPoint::new(40.71, -74.00).unwrap())];
//! let resources = vec![
//!     Resource::available("N1", GeoPoint::new(40.75, -73.98).unwrap()),
//!     Resource::available("N2", GeoPoint::new(40.72, -74.01).unwrap()),
//! ];
//!
//! let outcome = greedy_match(&sites, &resources);
//! assert_eq!(outcome.to_map()["S1"], "N2");
//! ```
//!
//! # Tie-break contract
//!
//! When several eligible resources share the minimum distance, the first
//! one in the caller's resource order wins. Sites are processed in the
//! caller's order unless a `SiteOrdering` is configured, and that ordering
//! is a stable sort, so caller order still breaks ties between sites.
//!
//! # References
//!
//! - Vazirani (2001), "Approximation Algorithms", Ch. 2 (greedy heuristics)
//! - Sinnott (1984), "Virtues of the Haversine"

mod greedy;
mod ordering;
mod ranking;
pub mod rules;
mod summary;

pub use greedy::{greedy_match, nearest_available, Eligibility, MatchOutcome, Matcher};
pub use ordering::SiteOrdering;
pub use ranking::{top_k_nearest, RankedResource};
pub use summary::CoverageSummary;

use crate::models::Site;
use std::fmt::Debug;

/// Score returned by a site rule.
///
/// Lower scores = served earlier.
pub type RuleScore = f64;

/// A rule that decides which sites claim resources first.
///
/// # Score Convention
/// **Lower score = earlier in the pass.** Earlier sites get first pick of
/// the nearest resources.
pub trait SiteRule: Send + Sync + Debug {
    /// Rule name (e.g., "CATEGORY").
    fn name(&self) -> &'static str;

    /// Evaluates a site's position in the matching pass.
    fn evaluate(&self, site: &Site) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
