//! Attractions as candidate stops of a sightseeing route

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{GeoPoint, ProviderCoordinate};
use crate::geo::{self, Located};

/// Rating assumed when the search hit carries none
pub const DEFAULT_RATING: f32 = 4.5;

/// Shown when the search hit carries no address
pub const ADDRESS_UNAVAILABLE: &str = "Address unavailable";

/// Stable identifier of a waypoint within one working set.
///
/// Display names are not unique, so detail lookups are keyed by this instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaypointId(String);

impl WaypointId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier for a hit the provider gave no `uid` for
    #[must_use]
    pub fn derived(position: usize, name: &str) -> Self {
        Self(format!("hit-{position}-{name}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WaypointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw hit from the place-search collaborator, before conversion
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceHit {
    pub uid: Option<String>,
    pub name: String,
    pub address: Option<String>,
    pub rating: Option<f32>,
    pub coordinate: ProviderCoordinate,
}

impl PlaceHit {
    /// Build the waypoint for this hit; `position` is its index in the result list
    #[must_use]
    pub fn into_waypoint(self, position: usize) -> Waypoint {
        let id = match self.uid.filter(|uid| !uid.trim().is_empty()) {
            Some(uid) => WaypointId::new(uid),
            None => WaypointId::derived(position, &self.name),
        };
        Waypoint::new(id, self.name, self.address, self.rating, self.coordinate)
    }
}

/// One candidate stop with location and descriptive metadata.
///
/// The geodetic coordinate is always derived from the provider coordinate and
/// cannot be set independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Waypoint {
    id: WaypointId,
    name: String,
    address: String,
    rating: f32,
    provider: ProviderCoordinate,
    geodetic: GeoPoint,
}

impl Waypoint {
    #[must_use]
    pub fn new(
        id: WaypointId,
        name: impl Into<String>,
        address: Option<String>,
        rating: Option<f32>,
        provider: ProviderCoordinate,
    ) -> Self {
        let address = address
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| ADDRESS_UNAVAILABLE.to_string());
        let rating = rating
            .filter(|r| r.is_finite())
            .map_or(DEFAULT_RATING, |r| r.clamp(0.0, 5.0));

        Self {
            id,
            name: name.into(),
            address,
            rating,
            provider,
            geodetic: geo::provider_to_geodetic(provider),
        }
    }

    #[must_use]
    pub fn id(&self) -> &WaypointId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn rating(&self) -> f32 {
        self.rating
    }

    #[must_use]
    pub fn provider(&self) -> ProviderCoordinate {
        self.provider
    }

    #[must_use]
    pub fn geodetic(&self) -> GeoPoint {
        self.geodetic
    }
}

impl Located for Waypoint {
    fn position(&self) -> GeoPoint {
        self.geodetic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(uid: Option<&str>, name: &str) -> PlaceHit {
        PlaceHit {
            uid: uid.map(str::to_string),
            name: name.to_string(),
            address: None,
            rating: None,
            coordinate: ProviderCoordinate::new(116.404, 39.915),
        }
    }

    #[test]
    fn test_geodetic_is_derived_from_provider() {
        let waypoint = hit(Some("abc"), "Tiananmen").into_waypoint(0);
        let (lat, lon) = geo::convert(116.404, 39.915);
        assert_eq!(waypoint.geodetic(), GeoPoint::new(lat, lon));
        assert_eq!(waypoint.provider(), ProviderCoordinate::new(116.404, 39.915));
    }

    #[test]
    fn test_uid_becomes_id() {
        let waypoint = hit(Some("uid-1"), "Palace").into_waypoint(3);
        assert_eq!(waypoint.id().as_str(), "uid-1");
    }

    #[test]
    fn test_missing_uid_derives_distinct_ids_for_same_name() {
        let first = hit(None, "Park").into_waypoint(0);
        let second = hit(Some("  "), "Park").into_waypoint(1);
        assert_ne!(first.id(), second.id());
        assert_eq!(first.id().as_str(), "hit-0-Park");
    }

    #[test]
    fn test_defaults_for_missing_metadata() {
        let waypoint = hit(None, "Park").into_waypoint(0);
        assert_eq!(waypoint.address(), ADDRESS_UNAVAILABLE);
        assert_eq!(waypoint.rating(), DEFAULT_RATING);
    }

    #[test]
    fn test_rating_is_clamped() {
        let mut raw = hit(None, "Park");
        raw.rating = Some(7.5);
        assert_eq!(raw.clone().into_waypoint(0).rating(), 5.0);
        raw.rating = Some(f32::NAN);
        assert_eq!(raw.into_waypoint(0).rating(), DEFAULT_RATING);
    }
}
