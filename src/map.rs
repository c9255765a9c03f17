//! Map view model for the current route

use serde::Serialize;

use crate::models::{GeoPoint, Waypoint};

pub const DEFAULT_ZOOM: u8 = 12;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub position: GeoPoint,
    /// "{n}. {name}" with n counted from 1 in route order
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
    pub markers: Vec<Marker>,
    /// Route line through every stop; absent for a single stop
    pub polyline: Option<Vec<GeoPoint>>,
}

impl MapView {
    /// Map centered on the first stop, or `None` for an empty route
    #[must_use]
    pub fn from_route(stops: &[Waypoint], selected: usize) -> Option<Self> {
        let first = stops.first()?;

        let markers = stops
            .iter()
            .enumerate()
            .map(|(index, stop)| Marker {
                position: stop.geodetic(),
                label: format!("{}. {}", index + 1, stop.name()),
                selected: index == selected,
            })
            .collect();

        let polyline = (stops.len() >= 2).then(|| stops.iter().map(Waypoint::geodetic).collect());

        Some(Self {
            center: first.geodetic(),
            zoom: DEFAULT_ZOOM,
            markers,
            polyline,
        })
    }
}
