//! QWeather 3-day forecast client with host fail-over

use anyhow::Result;
use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::WeatherProvider;
use super::http::{self, HttpSettings};
use crate::config::WeatherConfig;
use crate::error::FetchError;
use crate::models::{ForecastDay, GeoPoint};

const FORECAST_PATH: &str = "/v7/weather/3d";
const SUCCESS_CODE: &str = "200";
/// Upper bound on days kept from one response
pub const MAX_FORECAST_DAYS: usize = 4;

#[derive(Debug, Deserialize)]
struct DailyResponse {
    code: String,
    #[serde(default)]
    daily: Vec<DailyRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DailyRecord {
    fx_date: String,
    icon_day: String,
    text_day: String,
    temp_min: String,
    temp_max: String,
    wind_dir_day: String,
}

/// Map a QWeather icon code to a display glyph
#[must_use]
pub fn icon_for_code(code: &str) -> &'static str {
    match code.trim().parse::<u16>() {
        Ok(100 | 150) => "🌞",
        Ok(101..=103 | 151..=153) => "⛅",
        Ok(104) => "☁️",
        Ok(302..=304) => "⛈️",
        Ok(300..=399) => "🌧",
        Ok(400..=499) => "❄️",
        Ok(500..=599) => "🌫️",
        _ => "🌥️",
    }
}

fn parse_temperature(raw: &str, field: &str) -> Result<i32, FetchError> {
    raw.trim()
        .parse()
        .map_err(|_| FetchError::Parse(format!("{field} is not a number: '{raw}'")))
}

impl DailyRecord {
    fn into_forecast_day(self) -> Result<ForecastDay, FetchError> {
        // "2026-10-14" -> "10-14"
        let date = self
            .fx_date
            .get(5..)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| FetchError::Parse(format!("fxDate too short: '{}'", self.fx_date)))?
            .to_string();

        Ok(ForecastDay {
            date,
            icon: icon_for_code(&self.icon_day).to_string(),
            low_temp: parse_temperature(&self.temp_min, "tempMin")?,
            high_temp: parse_temperature(&self.temp_max, "tempMax")?,
            description: self.text_day,
            wind: self.wind_dir_day,
        })
    }
}

fn forecast_days(response: DailyResponse) -> Result<Vec<ForecastDay>, FetchError> {
    if response.code != SUCCESS_CODE {
        return Err(FetchError::Provider {
            code: response.code,
            message: "forecast request rejected".to_string(),
        });
    }
    if response.daily.is_empty() {
        return Err(FetchError::Parse("no daily records".to_string()));
    }

    response
        .daily
        .into_iter()
        .take(MAX_FORECAST_DAYS)
        .map(DailyRecord::into_forecast_day)
        .collect()
}

/// QWeather API client
pub struct QWeatherClient {
    client: ClientWithMiddleware,
    api_key: Option<String>,
    hosts: Vec<String>,
    lang: String,
}

impl QWeatherClient {
    /// Create a new client
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = http::build_client(HttpSettings::new(
            config.timeout_seconds,
            config.max_retries,
            config.use_system_proxy,
        ))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            hosts: config.hosts.clone(),
            lang: config.lang.clone(),
        })
    }

    async fn forecast_from(&self, host: &str, api_key: &str, at: GeoPoint) -> Result<Vec<ForecastDay>, FetchError> {
        let location = format!("{:.2},{:.2}", at.lon, at.lat);
        let url = http::url_with_params(
            host,
            FORECAST_PATH,
            &[("location", location.as_str()), ("key", api_key), ("lang", self.lang.as_str())],
        )?;

        let response: DailyResponse = http::get_json(&self.client, url).await?;
        forecast_days(response)
    }
}

#[async_trait]
impl WeatherProvider for QWeatherClient {
    #[instrument(skip(self), fields(lat = at.lat, lon = at.lon))]
    async fn forecast(&self, at: GeoPoint) -> Result<Vec<ForecastDay>, FetchError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(FetchError::NotConfigured("Weather API key"))?;

        let mut last_error = None;
        for host in &self.hosts {
            debug!("Requesting forecast from {}", host);
            match self.forecast_from(host, api_key, at).await {
                Ok(days) => {
                    info!("Retrieved {}-day forecast from {}", days.len(), host);
                    return Ok(days);
                }
                Err(e) => {
                    warn!("Forecast host {} failed: {}", host, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(FetchError::NotConfigured("Weather hosts")))
    }
}
