//! Matching configuration.
//!
//! Every field has a default, so an empty document is a valid config.
//!
//! ```toml
//! recommendation-count = 3
//! site-order = "category-priority"
//! require-capabilities = true
//! max-distance-miles = 25.0
//! flow-path-segments = 32
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Order in which sites claim resources during a matching pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SiteOrder {
    /// Caller's order.
    #[default]
    Input,
    /// Stable sort by `SiteCategory::priority`.
    CategoryPriority,
}

/// Tunables for matching, recommendations, and rendering geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct MatchConfig {
    /// Number of recommendations returned per site.
    pub recommendation_count: usize,
    /// Site processing order.
    pub site_order: SiteOrder,
    /// Whether site capability requirements restrict eligibility.
    pub require_capabilities: bool,
    /// Service radius; farther resources are ineligible. `None` = unlimited.
    pub max_distance_miles: Option<f64>,
    /// Segments per flow path (≥ 1).
    pub flow_path_segments: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            recommendation_count: 3,
            site_order: SiteOrder::Input,
            require_capabilities: true,
            max_distance_miles: None,
            flow_path_segments: 32,
        }
    }
}

impl MatchConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.flow_path_segments == 0 {
            return Err(Error::Config("flow-path-segments must be at least 1".into()));
        }
        if let Some(radius) = self.max_distance_miles {
            if !radius.is_finite() || radius < 0.0 {
                return Err(Error::Config(format!(
                    "max-distance-miles must be a non-negative number, got {radius}"
                )));
            }
        }
        Ok(())
    }

    /// Sets the recommendation count.
    pub fn with_recommendation_count(mut self, k: usize) -> Self {
        self.recommendation_count = k;
        self
    }

    /// Sets the site order.
    pub fn with_site_order(mut self, order: SiteOrder) -> Self {
        self.site_order = order;
        self
    }

    /// Enables or disables capability checks.
    pub fn with_require_capabilities(mut self, require: bool) -> Self {
        self.require_capabilities = require;
        self
    }

    /// Sets the service radius.
    pub fn with_max_distance(mut self, miles: f64) -> Self {
        self.max_distance_miles = Some(miles);
        self
    }

    /// Sets flow path resolution.
    pub fn with_flow_path_segments(mut self, segments: usize) -> Self {
        self.flow_path_segments = segments;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = MatchConfig::default();
        assert_eq!(c.recommendation_count, 3);
        assert_eq!(c.site_order, SiteOrder::Input);
        assert!(c.require_capabilities);
        assert_eq!(c.max_distance_miles, None);
        assert_eq!(c.flow_path_segments, 32);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(MatchConfig::from_toml_str("").unwrap(), MatchConfig::default());
    }

    #[test]
    fn test_full_document() {
        let c = MatchConfig::from_toml_str(
            r#"
            recommendation-count = 5
            site-order = "category-priority"
            require-capabilities = false
            max-distance-miles = 12.5
            flow-path-segments = 8
            "#,
        )
        .unwrap();

        assert_eq!(c.recommendation_count, 5);
        assert_eq!(c.site_order, SiteOrder::CategoryPriority);
        assert!(!c.require_capabilities);
        assert_eq!(c.max_distance_miles, Some(12.5));
        assert_eq!(c.flow_path_segments, 8);
    }

    #[test]
    fn test_invalid_values() {
        let err = MatchConfig::from_toml_str("flow-path-segments = 0").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = MatchConfig::from_toml_str("max-distance-miles = -1.0").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_parse_errors() {
        assert!(MatchConfig::from_toml_str("site-order = \"nearest\"").is_err());
        assert!(MatchConfig::from_toml_str("recommendation-count = \"three\"").is_err());
    }

    #[test]
    fn test_builder() {
        let c = MatchConfig::new()
            .with_recommendation_count(1)
            .with_site_order(SiteOrder::CategoryPriority)
            .with_require_capabilities(false)
            .with_max_distance(10.0)
            .with_flow_path_segments(4);
        assert_eq!(c.recommendation_count, 1);
        assert_eq!(c.max_distance_miles, Some(10.0));
        assert_eq!(c.flow_path_segments, 4);
    }
}
