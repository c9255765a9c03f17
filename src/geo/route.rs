//! Greedy nearest-neighbor ordering of sightseeing stops
//!
//! The first input element is the anchor and is never moved. Every following
//! stop is the closest one not yet visited, measured from the previous stop.
//! This is a heuristic, not an optimal tour: a greedy step can strand a far
//! stop at the end of the route.

use serde::{Deserialize, Serialize};

use crate::models::GeoPoint;

/// Anything with a geodetic position the optimizer can measure
pub trait Located {
    fn position(&self) -> GeoPoint;
}

impl Located for GeoPoint {
    fn position(&self) -> GeoPoint {
        *self
    }
}

/// Distance between two consecutive stops of a route
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    /// Index of the departure stop in the route
    pub from: usize,
    /// Index of the arrival stop in the route
    pub to: usize,
    pub distance_km: f64,
}

/// Visiting order over `points` as indices into the slice.
///
/// Ties go to the candidate that comes first in input order.
#[must_use]
pub fn nearest_neighbor_order(points: &[GeoPoint]) -> Vec<usize> {
    if points.is_empty() {
        return Vec::new();
    }

    let mut order = Vec::with_capacity(points.len());
    let mut remaining: Vec<usize> = (1..points.len()).collect();
    let mut current = 0;
    order.push(current);

    while !remaining.is_empty() {
        let from = points[current];
        let mut best_slot = 0;
        let mut best_distance = f64::INFINITY;

        for (slot, &candidate) in remaining.iter().enumerate() {
            let distance = from.distance_km(&points[candidate]);
            if distance < best_distance {
                best_slot = slot;
                best_distance = distance;
            }
        }

        // Vec::remove keeps the rest in input order, which the tie-break relies on
        current = remaining.remove(best_slot);
        order.push(current);
    }

    order
}

/// Reorder `waypoints` into a greedy nearest-neighbor route.
///
/// The input is left untouched; an empty or single-element input comes back
/// unchanged.
#[must_use]
pub fn optimize_route<T: Located + Clone>(waypoints: &[T]) -> Vec<T> {
    if waypoints.len() < 2 {
        return waypoints.to_vec();
    }

    let points: Vec<GeoPoint> = waypoints.iter().map(Located::position).collect();
    nearest_neighbor_order(&points)
        .into_iter()
        .map(|index| waypoints[index].clone())
        .collect()
}

/// Straight-line legs between consecutive stops
#[must_use]
pub fn legs<T: Located>(route: &[T]) -> Vec<Leg> {
    route
        .windows(2)
        .enumerate()
        .map(|(from, pair)| Leg {
            from,
            to: from + 1,
            distance_km: pair[0].position().distance_km(&pair[1].position()),
        })
        .collect()
}

/// Total straight-line length of a route in kilometres
#[must_use]
pub fn route_distance_km<T: Located>(route: &[T]) -> f64 {
    legs(route).iter().map(|leg| leg.distance_km).sum()
}
