//! Coordinate reconciliation and route ordering
//!
//! Pure, synchronous functions: the provider-to-geodetic conversion, the
//! haversine distance, and the greedy route optimizer built on top of it.

pub mod convert;
pub mod distance;
pub mod route;

pub use convert::{convert, provider_to_geodetic};
pub use distance::{EARTH_RADIUS_KM, distance_km};
pub use route::{Leg, Located, legs, nearest_neighbor_order, optimize_route, route_distance_km};
