//! External collaborators: place search, nearby lookups, weather, reviews
//!
//! Each collaborator sits behind a trait so the planner and the web layer can
//! run against stubs. Every call returns `Result<_, FetchError>`; choosing a
//! fallback is the caller's job (see [`fallback`]).

use async_trait::async_trait;

use crate::error::FetchError;
use crate::models::{ForecastDay, GeoPoint, NearbyCategory, NearbyPoi, PlaceHit, ProviderCoordinate, Review};

pub mod baidu;
pub mod chat;
pub mod fallback;
pub mod http;
pub mod qweather;

pub use baidu::BaiduPlaceClient;
pub use chat::{ChatReviewClient, parse_reviews};
pub use qweather::QWeatherClient;

/// Attraction search by keyword within a city
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    async fn search(&self, keyword: &str, city: &str) -> Result<Vec<PlaceHit>, FetchError>;
}

/// Places of one category around a provider-native coordinate
#[async_trait]
pub trait NearbySearch: Send + Sync {
    async fn nearby(
        &self,
        at: ProviderCoordinate,
        category: NearbyCategory,
        radius_m: u32,
    ) -> Result<Vec<NearbyPoi>, FetchError>;
}

/// Daily forecast for one geodetic point
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn forecast(&self, at: GeoPoint) -> Result<Vec<ForecastDay>, FetchError>;
}

/// Visitor reviews for an attraction
#[async_trait]
pub trait ReviewGenerator: Send + Sync {
    async fn reviews(&self, attraction: &str, city: &str) -> Result<Vec<Review>, FetchError>;
}
