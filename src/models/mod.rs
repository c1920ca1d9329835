//! Coverage domain models.
//!
//! Provides the data types for a coverage problem (sites needing a
//! resource, resources able to travel to them) and its solution (the
//! assignment relation).
//!
//! # Domain Mappings
//!
//! | site-match | Clinical trials | Field service | Delivery |
//! |------------|-----------------|---------------|----------|
//! | Site | Patient Home / Trial Site | Job Location | Drop Point |
//! | Resource | Nurse | Technician | Courier |
//! | Assignment | Nurse → Visit | Tech → Job | Courier → Stop |

mod assignment;
mod location;
mod resource;
mod site;

pub use assignment::{Assignment, AssignmentOrigin, AssignmentSet};
pub use location::GeoPoint;
pub use resource::{Availability, Resource};
pub use site::{Site, SiteCategory};
