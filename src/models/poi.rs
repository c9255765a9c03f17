//! Nearby points of interest and generated reviews shown in a stop's detail panel

use serde::{Deserialize, Serialize};

/// Rendered in place of an empty nearby list
pub const NO_NEARBY_RECORDS: &str = "No nearby records";

/// Categories looked up around a stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NearbyCategory {
    Food,
    Hotel,
}

impl NearbyCategory {
    /// Search keyword understood by the place provider
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            NearbyCategory::Food => "美食",
            NearbyCategory::Hotel => "酒店",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            NearbyCategory::Food => "Food",
            NearbyCategory::Hotel => "Hotels",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyPoi {
    pub name: String,
    /// Distance from the stop in metres, when the provider reports it
    pub distance_m: Option<u32>,
}

/// Comma-separated names, or the "no records" sentinel for an empty list
#[must_use]
pub fn summarize_nearby(pois: &[NearbyPoi]) -> String {
    if pois.is_empty() {
        return NO_NEARBY_RECORDS.to_string();
    }
    pois.iter()
        .map(|poi| match poi.distance_m {
            Some(m) => format!("{} ({m} m)", poi.name),
            None => poi.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    pub rating: String,
    pub comment: String,
}

impl Review {
    /// Generic positive review used when generation fails entirely
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            author: "Traveller".to_string(),
            rating: "5.0".to_string(),
            comment: "A wonderful place, well worth the visit.".to_string(),
        }
    }
}

/// Lazily loaded detail panel for one stop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub food: Vec<NearbyPoi>,
    pub hotels: Vec<NearbyPoi>,
    pub reviews: Vec<Review>,
}

impl PlaceDetails {
    #[must_use]
    pub fn nearby(&self, category: NearbyCategory) -> &[NearbyPoi] {
        match category {
            NearbyCategory::Food => &self.food,
            NearbyCategory::Hotel => &self.hotels,
        }
    }
}
