//! Data models for the citytour application
//!
//! This module contains the core domain models organized by concern:
//! - Location: provider-native and geodetic coordinates
//! - Waypoint: attractions and raw place-search hits
//! - Forecast: daily weather records
//! - Poi: nearby places, reviews and the per-stop detail panel

pub mod forecast;
pub mod location;
pub mod poi;
pub mod waypoint;

// Re-export all public types for convenient access
pub use forecast::{Forecast, ForecastDay, ForecastSource};
pub use location::{GeoPoint, ProviderCoordinate};
pub use poi::{NearbyCategory, NearbyPoi, PlaceDetails, Review, summarize_nearby};
pub use waypoint::{PlaceHit, Waypoint, WaypointId};
