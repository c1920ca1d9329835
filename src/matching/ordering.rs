//! Site ordering for the greedy pass.
//!
//! Composes site rules sequentially: the next rule is consulted only when
//! the previous one ties. Sorting is stable, so the caller's site order is
//! the final tie-breaker.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{RuleScore, SiteRule};
use crate::models::Site;

/// A composable, stable site ordering.
///
/// An ordering with no rules keeps the caller's order unchanged.
///
/// # Example
/// ```
/// use site_match::matching::{rules, SiteOrdering};
///
/// let ordering = SiteOrdering::new()
///     .with_rule(rules::CategoryPriority)
///     .with_rule(rules::MostConstrained);
/// assert_eq!(ordering.rule_names(), vec!["CATEGORY", "MCF"]);
/// ```
#[derive(Clone)]
pub struct SiteOrdering {
    rules: Vec<Arc<dyn SiteRule>>,
    epsilon: f64,
}

impl SiteOrdering {
    /// Creates an ordering that preserves input order.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            epsilon: 1e-9,
        }
    }

    /// Appends a rule (consulted after all previously added rules tie).
    pub fn with_rule<R: SiteRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Whether this ordering keeps input order.
    pub fn is_input_order(&self) -> bool {
        self.rules.is_empty()
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Returns indices into `sites` in matching order.
    pub fn sort_indices(&self, sites: &[Site]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..sites.len()).collect();
        if self.rules.is_empty() {
            return indices;
        }

        let scores: Vec<Vec<RuleScore>> = sites.iter().map(|s| self.evaluate(s)).collect();
        indices.sort_by(|&a, &b| self.compare(&scores[a], &scores[b]));
        indices
    }

    /// Evaluates a site against every rule.
    pub fn evaluate(&self, site: &Site) -> Vec<RuleScore> {
        self.rules.iter().map(|r| r.evaluate(site)).collect()
    }

    fn compare(&self, a: &[RuleScore], b: &[RuleScore]) -> Ordering {
        for (sa, sb) in a.iter().zip(b) {
            if (sa - sb).abs() > self.epsilon {
                return sa.partial_cmp(sb).unwrap_or(Ordering::Equal);
            }
        }
        Ordering::Equal
    }
}

impl Default for SiteOrdering {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SiteOrdering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteOrdering")
            .field("rules", &self.rule_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::rules;
    use crate::models::GeoPoint;

    fn origin() -> GeoPoint {
        GeoPoint::new(0.0, 0.0).unwrap()
    }

    fn mixed_sites() -> Vec<Site> {
        vec![
            Site::candidate_site("C1", origin()),
            Site::trial_site("T1", origin()),
            Site::patient_home("H1", origin()),
            Site::trial_site("T2", origin()).with_requirement("phlebotomy"),
            Site::patient_home("H2", origin()),
        ]
    }

    fn ids(sites: &[Site], order: &[usize]) -> Vec<String> {
        order.iter().map(|&i| sites[i].id.clone()).collect()
    }

    #[test]
    fn test_empty_ordering_keeps_input() {
        let sites = mixed_sites();
        let ordering = SiteOrdering::new();
        assert!(ordering.is_input_order());
        assert_eq!(ordering.sort_indices(&sites), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_category_ordering_is_stable() {
        let sites = mixed_sites();
        let ordering = SiteOrdering::new().with_rule(rules::CategoryPriority);
        let order = ordering.sort_indices(&sites);
        assert_eq!(ids(&sites, &order), vec!["H1", "H2", "T1", "T2", "C1"]);
    }

    #[test]
    fn test_second_rule_breaks_ties() {
        let sites = mixed_sites();
        let ordering = SiteOrdering::new()
            .with_rule(rules::CategoryPriority)
            .with_rule(rules::MostConstrained);
        let order = ordering.sort_indices(&sites);
        assert_eq!(ids(&sites, &order), vec!["H1", "H2", "T2", "T1", "C1"]);
    }

    #[test]
    fn test_empty_sites() {
        let ordering = SiteOrdering::new().with_rule(rules::CategoryPriority);
        assert!(ordering.sort_indices(&[]).is_empty());
    }

    #[test]
    fn test_debug_lists_rules() {
        let ordering = SiteOrdering::new().with_rule(rules::CategoryPriority);
        assert_eq!(format!("{ordering:?}"), r#"SiteOrdering { rules: ["CATEGORY"] }"#);
    }
}
