//! Spherical geometry.
//!
//! All distances use a spherical Earth with a fixed radius of 3958.8 miles.
//! Inputs are `GeoPoint`s, so coordinates are range-checked before they
//! reach any formula here.

mod distance;
mod path;

pub use distance::{distance_miles, initial_bearing, EARTH_RADIUS_MILES};
pub use path::{great_circle_path, interpolate};
