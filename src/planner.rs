//! Trip planning: search, optional route optimization, forecast and the
//! per-stop detail panel.

use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::config::TourConfig;
use crate::error::TourError;
use crate::geo::{self, Leg};
use crate::models::{Forecast, NearbyCategory, NearbyPoi, PlaceDetails, Review, Waypoint, WaypointId};
use crate::providers::fallback::{fallback_reviews, forecast_or_mock};
use crate::providers::{
    BaiduPlaceClient, ChatReviewClient, NearbySearch, PlaceSearch, QWeatherClient, ReviewGenerator,
    WeatherProvider,
};
use crate::session::Session;

/// Keyword used when a request leaves it blank
pub const DEFAULT_KEYWORD: &str = "旅游景点";

#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub city: String,
    pub keyword: String,
    pub start_date: NaiveDate,
    pub optimize: bool,
}

/// An ordered route through one city's attractions
#[derive(Debug, Clone, Serialize)]
pub struct TripPlan {
    pub city: String,
    pub keyword: String,
    pub start_date: NaiveDate,
    pub stops: Vec<Waypoint>,
    pub optimized: bool,
    pub legs: Vec<Leg>,
    pub total_distance_km: f64,
    pub forecast: Forecast,
}

impl TripPlan {
    /// Assemble a plan, deriving legs and the total from `stops`
    #[must_use]
    pub fn assemble(
        city: impl Into<String>,
        keyword: impl Into<String>,
        start_date: NaiveDate,
        stops: Vec<Waypoint>,
        optimized: bool,
        forecast: Forecast,
    ) -> Self {
        let legs = geo::legs(&stops);
        let total_distance_km = geo::route_distance_km(&stops);
        Self {
            city: city.into(),
            keyword: keyword.into(),
            start_date,
            stops,
            optimized,
            legs,
            total_distance_km,
            forecast,
        }
    }
}

/// Coordinates the collaborators behind one planning request
pub struct TripPlanner {
    places: Arc<dyn PlaceSearch>,
    nearby: Arc<dyn NearbySearch>,
    weather: Arc<dyn WeatherProvider>,
    reviews: Arc<dyn ReviewGenerator>,
    nearby_radius_m: u32,
}

impl TripPlanner {
    #[must_use]
    pub fn new(
        places: Arc<dyn PlaceSearch>,
        nearby: Arc<dyn NearbySearch>,
        weather: Arc<dyn WeatherProvider>,
        reviews: Arc<dyn ReviewGenerator>,
    ) -> Self {
        Self {
            places,
            nearby,
            weather,
            reviews,
            nearby_radius_m: 1000,
        }
    }

    #[must_use]
    pub fn with_nearby_radius(mut self, radius_m: u32) -> Self {
        self.nearby_radius_m = radius_m;
        self
    }

    /// Build the planner with the HTTP clients described by `config`
    pub fn from_config(config: &TourConfig) -> anyhow::Result<Self> {
        let baidu = Arc::new(
            BaiduPlaceClient::new(&config.places, &config.nearby)
                .context("Failed to create place search client")?,
        );
        let weather = QWeatherClient::new(&config.weather).context("Failed to create weather client")?;
        let reviews = ChatReviewClient::new(&config.reviews).context("Failed to create review client")?;

        Ok(Self::new(baidu.clone(), baidu, Arc::new(weather), Arc::new(reviews))
            .with_nearby_radius(config.nearby.radius_m))
    }

    /// Search attractions, order them and attach a forecast for the first stop
    #[instrument(skip(self), fields(city = %request.city))]
    pub async fn plan(&self, request: &PlanRequest) -> Result<TripPlan> {
        let city = request.city.trim();
        if city.is_empty() {
            return Err(TourError::validation("city must not be empty"));
        }
        let keyword = match request.keyword.trim() {
            "" => DEFAULT_KEYWORD,
            keyword => keyword,
        };

        let hits = match self.places.search(keyword, city).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!("Place search failed for '{}' in {}: {}", keyword, city, e);
                Vec::new()
            }
        };
        if hits.is_empty() {
            return Err(TourError::NoAttractions { city: city.to_string() });
        }

        let mut waypoints: Vec<Waypoint> = Vec::with_capacity(hits.len());
        for (position, hit) in hits.into_iter().enumerate() {
            let waypoint = hit.into_waypoint(position);
            if waypoints.iter().any(|w| w.id() == waypoint.id()) {
                debug!("Skipping duplicate hit {}", waypoint.id());
                continue;
            }
            waypoints.push(waypoint);
        }

        let stops = if request.optimize {
            geo::optimize_route(&waypoints)
        } else {
            waypoints
        };

        let forecast = forecast_or_mock(self.weather.as_ref(), stops[0].geodetic(), request.start_date).await;

        let plan = TripPlan::assemble(city, keyword, request.start_date, stops, request.optimize, forecast);
        info!(
            "Planned {} stops in {} ({:.1} km, optimized: {})",
            plan.stops.len(),
            plan.city,
            plan.total_distance_km,
            plan.optimized
        );
        Ok(plan)
    }

    async fn nearby_or_empty(&self, stop: &Waypoint, category: NearbyCategory) -> Vec<NearbyPoi> {
        match self.nearby.nearby(stop.provider(), category, self.nearby_radius_m).await {
            Ok(pois) => pois,
            Err(e) => {
                warn!("{} lookup failed near {}: {}", category.label(), stop.name(), e);
                Vec::new()
            }
        }
    }

    async fn reviews_or_fallback(&self, stop: &Waypoint, city: &str) -> Vec<Review> {
        match self.reviews.reviews(stop.name(), city).await {
            Ok(reviews) => reviews,
            Err(e) => {
                warn!("Review generation failed for {}: {}", stop.name(), e);
                fallback_reviews()
            }
        }
    }

    /// Food, hotels and reviews for one stop; every part falls back on failure
    pub async fn details(&self, stop: &Waypoint, city: &str) -> PlaceDetails {
        let (food, hotels, reviews) = futures::join!(
            self.nearby_or_empty(stop, NearbyCategory::Food),
            self.nearby_or_empty(stop, NearbyCategory::Hotel),
            self.reviews_or_fallback(stop, city),
        );
        PlaceDetails { food, hotels, reviews }
    }

    /// Details for stop `id` of the session's plan, loaded once per TTL.
    ///
    /// The session lock is released while the collaborators are queried.
    pub async fn details_cached(&self, session: &Mutex<Session>, id: &WaypointId) -> Result<PlaceDetails> {
        let (stop, city) = {
            let session = session.lock().await;
            if let Some(details) = session.cached_details(id) {
                debug!("Detail cache hit for {}", id);
                return Ok(details.clone());
            }
            let city = session.require_plan()?.city.clone();
            let stop = session
                .stop(id)
                .cloned()
                .ok_or_else(|| TourError::UnknownStop { id: id.to_string() })?;
            (stop, city)
        };

        let details = self.details(&stop, &city).await;

        let mut session = session.lock().await;
        // the plan may have been replaced while we were fetching
        if session.stop(id).is_some() {
            session.store_details(id.clone(), details.clone());
        }
        Ok(details)
    }
}
