//! Baidu Place API v2 client for attraction search and nearby lookups

use anyhow::Result;
use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::http::{self, HttpSettings};
use super::{NearbySearch, PlaceSearch};
use crate::config::{NearbyConfig, PlaceSearchConfig};
use crate::error::FetchError;
use crate::models::{NearbyCategory, NearbyPoi, PlaceHit, ProviderCoordinate};

const SEARCH_PATH: &str = "/place/v2/search";
/// Detailed results, which carry ratings and distances
const DETAILED_SCOPE: &str = "2";

/// Place search response envelope
#[derive(Debug, Deserialize)]
struct SearchResponse {
    status: i64,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    name: String,
    #[serde(default)]
    uid: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    location: Option<HitLocation>,
    #[serde(default)]
    detail_info: Option<DetailInfo>,
}

#[derive(Debug, Deserialize)]
struct HitLocation {
    lat: f64,
    lng: f64,
}

/// Numbers in here arrive as either JSON strings or numbers
#[derive(Debug, Deserialize)]
struct DetailInfo {
    #[serde(default)]
    overall_rating: Option<Value>,
    #[serde(default)]
    distance: Option<Value>,
}

fn lenient_f64(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl SearchResponse {
    fn into_results(self) -> Result<Vec<SearchHit>, FetchError> {
        if self.status != 0 {
            return Err(FetchError::Provider {
                code: self.status.to_string(),
                message: self.message.unwrap_or_default(),
            });
        }
        Ok(self.results)
    }
}

impl SearchHit {
    fn rating(&self) -> Option<f32> {
        let detail = self.detail_info.as_ref()?;
        lenient_f64(detail.overall_rating.as_ref()).map(|r| r as f32)
    }

    fn distance_m(&self) -> Option<u32> {
        let detail = self.detail_info.as_ref()?;
        lenient_f64(detail.distance.as_ref())
            .filter(|d| d.is_finite() && *d >= 0.0)
            .map(|d| d.round() as u32)
    }

    fn into_place_hit(self) -> Option<PlaceHit> {
        let rating = self.rating();
        let location = self.location?;
        let coordinate = ProviderCoordinate::new(location.lng, location.lat);
        if !coordinate.is_finite() {
            return None;
        }
        Some(PlaceHit {
            uid: self.uid,
            name: self.name,
            address: self.address,
            rating,
            coordinate,
        })
    }
}

fn place_hits(response: SearchResponse) -> Result<Vec<PlaceHit>, FetchError> {
    let results = response.into_results()?;
    let total = results.len();
    let hits: Vec<PlaceHit> = results.into_iter().filter_map(SearchHit::into_place_hit).collect();
    if hits.len() < total {
        warn!("Dropped {} search hits without a usable location", total - hits.len());
    }
    Ok(hits)
}

fn nearby_pois(response: SearchResponse) -> Result<Vec<NearbyPoi>, FetchError> {
    Ok(response
        .into_results()?
        .into_iter()
        .map(|hit| NearbyPoi {
            distance_m: hit.distance_m(),
            name: hit.name,
        })
        .collect())
}

/// Baidu Place API client
pub struct BaiduPlaceClient {
    client: ClientWithMiddleware,
    api_key: Option<String>,
    base_url: String,
    page_size: u32,
    nearby_page_size: u32,
}

impl BaiduPlaceClient {
    /// Create a new client
    pub fn new(places: &PlaceSearchConfig, nearby: &NearbyConfig) -> Result<Self> {
        let client = http::build_client(HttpSettings::new(
            places.timeout_seconds,
            places.max_retries,
            places.use_system_proxy,
        ))?;

        Ok(Self {
            client,
            api_key: places.api_key.clone(),
            base_url: places.base_url.clone(),
            page_size: places.page_size,
            nearby_page_size: nearby.page_size,
        })
    }

    fn api_key(&self) -> Result<&str, FetchError> {
        self.api_key
            .as_deref()
            .ok_or(FetchError::NotConfigured("Place search API key"))
    }
}

#[async_trait]
impl PlaceSearch for BaiduPlaceClient {
    #[instrument(skip(self))]
    async fn search(&self, keyword: &str, city: &str) -> Result<Vec<PlaceHit>, FetchError> {
        let page_size = self.page_size.to_string();
        let url = http::url_with_params(
            &self.base_url,
            SEARCH_PATH,
            &[
                ("query", keyword),
                ("region", city),
                ("output", "json"),
                ("ak", self.api_key()?),
                ("scope", DETAILED_SCOPE),
                ("page_size", page_size.as_str()),
            ],
        )?;

        let response: SearchResponse = http::get_json(&self.client, url).await?;
        let hits = place_hits(response)?;
        info!("Found {} places for '{}' in {}", hits.len(), keyword, city);
        Ok(hits)
    }
}

#[async_trait]
impl NearbySearch for BaiduPlaceClient {
    #[instrument(skip(self))]
    async fn nearby(
        &self,
        at: ProviderCoordinate,
        category: NearbyCategory,
        radius_m: u32,
    ) -> Result<Vec<NearbyPoi>, FetchError> {
        let location = at.to_query_param();
        let radius = radius_m.to_string();
        let page_size = self.nearby_page_size.to_string();
        let url = http::url_with_params(
            &self.base_url,
            SEARCH_PATH,
            &[
                ("query", category.keyword()),
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("output", "json"),
                ("ak", self.api_key()?),
                ("scope", DETAILED_SCOPE),
                ("page_size", page_size.as_str()),
            ],
        )?;

        let response: SearchResponse = http::get_json(&self.client, url).await?;
        nearby_pois(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TourConfig;

    const SEARCH_FIXTURE: &str = r#"{
        "status": 0,
        "message": "ok",
        "results": [
            {
                "name": "故宫博物院",
                "location": {"lat": 39.924091, "lng": 116.403414},
                "address": "北京市东城区景山前街4号",
                "uid": "5a8fb739999a70a54207c130",
                "detail_info": {"overall_rating": "4.8"}
            },
            {
                "name": "天坛公园",
                "location": {"lat": 39.888, "lng": 116.416},
                "uid": "b1",
                "detail_info": {"overall_rating": 4.6}
            },
            {
                "name": "无坐标",
                "uid": "b2"
            },
            {
                "name": "颐和园",
                "location": {"lat": 40.0, "lng": 116.28}
            }
        ]
    }"#;

    #[test]
    fn test_parse_search_hits() {
        let response: SearchResponse = serde_json::from_str(SEARCH_FIXTURE).unwrap();
        let hits = place_hits(response).unwrap();
        assert_eq!(hits.len(), 3);

        assert_eq!(hits[0].name, "故宫博物院");
        assert_eq!(hits[0].uid.as_deref(), Some("5a8fb739999a70a54207c130"));
        assert_eq!(hits[0].rating, Some(4.8));
        assert_eq!(hits[0].coordinate, ProviderCoordinate::new(116.403414, 39.924091));

        assert_eq!(hits[1].rating, Some(4.6));
        assert!(hits[1].address.is_none());

        assert!(hits[2].uid.is_none());
        assert!(hits[2].rating.is_none());
    }

    #[test]
    fn test_nonzero_status_is_provider_error() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"status": 240, "message": "APP 服务被禁用"}"#).unwrap();
        match place_hits(response) {
            Err(FetchError::Provider { code, .. }) => assert_eq!(code, "240"),
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_nearby_distances() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"status": 0, "results": [
                {"name": "全聚德", "detail_info": {"distance": 230}},
                {"name": "四季民福", "detail_info": {"distance": "415"}},
                {"name": "小吃街"}
            ]}"#,
        )
        .unwrap();
        let pois = nearby_pois(response).unwrap();
        assert_eq!(pois.len(), 3);
        assert_eq!(pois[0].distance_m, Some(230));
        assert_eq!(pois[1].distance_m, Some(415));
        assert_eq!(pois[2].distance_m, None);
    }

    #[test]
    fn test_lenient_numbers() {
        assert_eq!(lenient_f64(Some(&Value::String(" 4.2 ".to_string()))), Some(4.2));
        assert_eq!(lenient_f64(Some(&Value::Bool(true))), None);
        assert_eq!(lenient_f64(None), None);
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let config = TourConfig::default();
        let client = BaiduPlaceClient::new(&config.places, &config.nearby).unwrap();
        let result = client.search("旅游景点", "北京").await;
        assert!(matches!(result, Err(FetchError::NotConfigured(_))));
    }
}
