//! Coordinate pairs in the provider's projected frame and in geodetic degrees

use serde::{Deserialize, Serialize};

use crate::geo;

/// Point in the map provider's native (BD-09) frame, as returned by place search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProviderCoordinate {
    /// Provider longitude
    pub x: f64,
    /// Provider latitude
    pub y: f64,
}

impl ProviderCoordinate {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Format as the provider's `location` query parameter ("lat,lng")
    #[must_use]
    pub fn to_query_param(&self) -> String {
        format!("{},{}", self.y, self.x)
    }
}

/// Standard latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to `other` in kilometres
    #[must_use]
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        geo::distance_km(self.lat, self.lon, other.lat, other.lon)
    }
}
