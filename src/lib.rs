//! `citytour` - City sightseeing route planner
//!
//! This library searches attractions in a city, reconciles the map provider's
//! coordinates with geodetic ones, orders the stops into a greedy
//! nearest-neighbor route and decorates the result with weather, nearby
//! places, reviews, packing and budget helpers.

pub mod api;
pub mod budget;
pub mod config;
pub mod error;
pub mod export;
pub mod geo;
pub mod logging;
pub mod map;
pub mod models;
pub mod packing;
pub mod planner;
pub mod providers;
pub mod session;
pub mod web;

// Re-export core types for public API
pub use config::TourConfig;
pub use error::{FetchError, TourError};
pub use geo::{convert, distance_km, optimize_route};
pub use models::{Forecast, ForecastDay, GeoPoint, PlaceDetails, ProviderCoordinate, Waypoint, WaypointId};
pub use planner::{PlanRequest, TripPlan, TripPlanner};
pub use session::Session;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TourError>;
