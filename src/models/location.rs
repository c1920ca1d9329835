//! Geographic coordinates.
//!
//! `GeoPoint` is the only way coordinates enter the crate. Construction
//! validates the WGS84 ranges, because the Haversine formula silently
//! returns wrong distances for out-of-range input instead of failing.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A latitude/longitude pair in decimal degrees.
///
/// Invariant: `lat ∈ [-90, 90]`, `lng ∈ [-180, 180]`, both finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint", into = "RawGeoPoint")]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawGeoPoint {
    lat: f64,
    lng: f64,
}

impl GeoPoint {
    /// Latitude bound (degrees).
    pub const MAX_LAT: f64 = 90.0;
    /// Longitude bound (degrees).
    pub const MAX_LNG: f64 = 180.0;

    /// Creates a point, rejecting out-of-range or non-finite coordinates.
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        if !lat.is_finite()
            || !lng.is_finite()
            || lat.abs() > Self::MAX_LAT
            || lng.abs() > Self::MAX_LNG
        {
            return Err(Error::InvalidCoordinate { lat, lng });
        }
        Ok(Self { lat, lng })
    }

    /// Creates a point, clamping coordinates into range.
    ///
    /// Non-finite input is still rejected; there is no sensible clamp for NaN.
    pub fn clamped(lat: f64, lng: f64) -> Result<Self> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(Error::InvalidCoordinate { lat, lng });
        }
        Ok(Self {
            lat: lat.clamp(-Self::MAX_LAT, Self::MAX_LAT),
            lng: lng.clamp(-Self::MAX_LNG, Self::MAX_LNG),
        })
    }

    /// Latitude in degrees.
    #[inline]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    #[inline]
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Latitude in radians.
    #[inline]
    pub fn lat_rad(&self) -> f64 {
        self.lat.to_radians()
    }

    /// Longitude in radians.
    #[inline]
    pub fn lng_rad(&self) -> f64 {
        self.lng.to_radians()
    }

    // Geometry results: in range up to rounding.
    pub(crate) fn from_trusted(lat: f64, lng: f64) -> Self {
        Self {
            lat: lat.clamp(-Self::MAX_LAT, Self::MAX_LAT),
            lng: lng.clamp(-Self::MAX_LNG, Self::MAX_LNG),
        }
    }

    pub(crate) fn from_geo(p: ::geo::Point<f64>) -> Self {
        Self::from_trusted(p.y(), p.x())
    }
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = Error;

    fn try_from(raw: RawGeoPoint) -> Result<Self> {
        Self::new(raw.lat, raw.lng)
    }
}

impl From<GeoPoint> for RawGeoPoint {
    fn from(p: GeoPoint) -> Self {
        Self {
            lat: p.lat,
            lng: p.lng,
        }
    }
}

// geo uses (x, y) = (lng, lat)
impl From<GeoPoint> for ::geo::Point<f64> {
    fn from(p: GeoPoint) -> Self {
        ::geo::Point::new(p.lng, p.lat)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lng)
    }
}
