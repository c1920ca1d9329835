//! Geographic coverage matching.
//!
//! Assigns mobile resources (nurses, technicians, couriers) to sites that
//! need coverage, using great-circle distance and a greedy
//! nearest-available-resource policy. Also provides the state a map
//! workspace needs around that: recommendations, manual overrides, marker
//! reconciliation, and flow-path geometry.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `GeoPoint`, `Site`, `Resource`,
//!   `Assignment`, `AssignmentSet`
//! - **`geo`**: Haversine distance, bearing, great-circle interpolation
//! - **`matching`**: Greedy matcher, top-K ranking, site ordering rules,
//!   coverage summary
//! - **`workspace`**: Session state, marker diffs, flow paths
//! - **`validation`**: Input integrity checks (duplicate IDs, dangling references)
//! - **`config`**: `MatchConfig` (TOML-loadable)
//! - **`demo`**: Fixture dataset and seeded generator
//!
//! # Execution model
//!
//! Everything is synchronous and allocation-light. Matching is a pure
//! function of its inputs and returns a new assignment list, so callers can
//! run it from any thread without extra synchronization.
//!
//! # References
//!
//! - Sinnott (1984), "Virtues of the Haversine"
//! - Vazirani (2001), "Approximation Algorithms"

pub mod config;
pub mod demo;
pub mod error;
pub mod geo;
pub mod matching;
pub mod models;
pub mod validation;
pub mod workspace;

pub use error::{Error, Result};
