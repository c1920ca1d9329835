//! Crate error type.
//!
//! Only caller mistakes are errors. An exhausted resource pool is a normal
//! matching outcome and is reported through `MatchOutcome::unassigned`.

use crate::validation::ValidationError;

/// Errors raised by coordinate construction, workspace operations, and
/// configuration loading.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Latitude outside [-90, 90], longitude outside [-180, 180], or non-finite.
    #[error("invalid coordinate: lat={lat}, lng={lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },

    #[error("unknown site: {0}")]
    UnknownSite(String),

    #[error("unknown resource: {0}")]
    UnknownResource(String),

    /// A manual override targeted a resource that cannot take work.
    #[error("resource is unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("invalid config: {0}")]
    Config(String),

    /// Workspace input failed `validation::validate_input`.
    #[error("invalid input: {}", summarize(.0))]
    Validation(Vec<ValidationError>),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = Error::InvalidCoordinate {
            lat: 91.0,
            lng: 0.0,
        };
        assert_eq!(e.to_string(), "invalid coordinate: lat=91, lng=0");
        assert_eq!(
            Error::UnknownSite("S9".into()).to_string(),
            "unknown site: S9"
        );
        assert_eq!(
            Error::ResourceUnavailable("N3".into()).to_string(),
            "resource is unavailable: N3"
        );
    }

    #[test]
    fn test_validation_message_joins_errors() {
        use crate::models::{GeoPoint, Site};
        use crate::validation::validate_input;

        let origin = GeoPoint::new(0.0, 0.0).unwrap();
        let sites = vec![
            Site::trial_site("S1", origin),
            Site::trial_site("S1", origin).with_assigned("GHOST"),
        ];
        let err = Error::Validation(validate_input(&sites, &[]).unwrap_err());
        assert_eq!(
            err.to_string(),
            "invalid input: Duplicate site ID: S1; Site 'S1' references unknown resource 'GHOST'"
        );
    }
}
