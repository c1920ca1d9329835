//! Coverage metrics.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Coverage rate | assigned sites / sites |
//! | Total distance | Sum of resource → site distances |
//! | Max distance | Longest single trip |
//! | Load | Sites served per resource |

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{AssignmentSet, Site};

/// Coverage indicators for a set of sites under an assignment set.
///
/// Distances are in miles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageSummary {
    /// Number of sites considered.
    pub site_count: usize,
    /// Sites with an assignment.
    pub assigned_count: usize,
    /// Sites without an assignment, in input order.
    pub unassigned: Vec<String>,
    /// Fraction of sites covered (1.0 when there are no sites).
    pub coverage_rate: f64,
    /// Sum of assignment distances.
    pub total_distance_miles: f64,
    /// Mean assignment distance (0.0 when nothing is assigned).
    pub avg_distance_miles: f64,
    /// Longest assignment distance.
    pub max_distance_miles: f64,
    /// Sites served per resource.
    pub load_by_resource: BTreeMap<String, usize>,
}

impl CoverageSummary {
    /// Computes the summary for `sites`.
    ///
    /// Assignments for sites not in `sites` are ignored.
    pub fn calculate(sites: &[Site], assignments: &AssignmentSet) -> Self {
        let mut assigned_count = 0;
        let mut unassigned = Vec::new();
        let mut total = 0.0;
        let mut max: f64 = 0.0;
        let mut load_by_resource = BTreeMap::new();

        for site in sites {
            match assignments.for_site(&site.id) {
                Some(a) => {
                    assigned_count += 1;
                    total += a.distance_miles;
                    max = max.max(a.distance_miles);
                    *load_by_resource.entry(a.resource_id.clone()).or_insert(0) += 1;
                }
                None => unassigned.push(site.id.clone()),
            }
        }

        let coverage_rate = if sites.is_empty() {
            1.0
        } else {
            assigned_count as f64 / sites.len() as f64
        };
        let avg_distance_miles = if assigned_count == 0 {
            0.0
        } else {
            total / assigned_count as f64
        };

        Self {
            site_count: sites.len(),
            assigned_count,
            unassigned,
            coverage_rate,
            total_distance_miles: total,
            avg_distance_miles,
            max_distance_miles: max,
            load_by_resource,
        }
    }

    /// Whether coverage and travel meet the given thresholds.
    pub fn meets_thresholds(&self, min_coverage: f64, max_distance_miles: f64) -> bool {
        self.coverage_rate >= min_coverage && self.max_distance_miles <= max_distance_miles
    }
}
