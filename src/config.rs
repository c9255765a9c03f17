//! Configuration management for the citytour application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TourError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure for the citytour application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TourConfig {
    /// Place search (attractions and nearby POIs) provider
    #[serde(default)]
    pub places: PlaceSearchConfig,
    /// Nearby lookup settings
    #[serde(default)]
    pub nearby: NearbyConfig,
    /// Weather provider
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Review generation provider
    #[serde(default)]
    pub reviews: ReviewConfig,
    /// Session cache settings
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Web server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Default application settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Place search API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceSearchConfig {
    /// Map provider access key, passed through on every request
    pub api_key: Option<String>,
    /// Base URL of the map provider
    #[serde(default = "default_places_base_url")]
    pub base_url: String,
    /// Number of attractions requested per search
    #[serde(default = "default_places_page_size")]
    pub page_size: u32,
    /// Request timeout in seconds
    #[serde(default = "default_places_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient failures
    #[serde(default = "default_places_max_retries")]
    pub max_retries: u32,
    /// Route requests through system proxy settings
    #[serde(default)]
    pub use_system_proxy: bool,
}

/// Nearby food / hotel lookup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyConfig {
    /// Search radius around a stop in metres
    #[serde(default = "default_nearby_radius")]
    pub radius_m: u32,
    /// Number of places listed per category
    #[serde(default = "default_nearby_page_size")]
    pub page_size: u32,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Weather API key; without one the placeholder forecast is used
    pub api_key: Option<String>,
    /// Forecast endpoints, tried in order
    #[serde(default = "default_weather_hosts")]
    pub hosts: Vec<String>,
    /// Language of forecast descriptions
    #[serde(default = "default_weather_lang")]
    pub lang: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries per host
    #[serde(default)]
    pub max_retries: u32,
    /// Route requests through system proxy settings
    #[serde(default)]
    pub use_system_proxy: bool,
}

/// Review generation (chat completion) configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// API key; without one the fallback review is used
    pub api_key: Option<String>,
    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_reviews_base_url")]
    pub base_url: String,
    /// Model name
    #[serde(default = "default_reviews_model")]
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_reviews_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient failures
    #[serde(default = "default_reviews_max_retries")]
    pub max_retries: u32,
}

/// Session cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// How long loaded stop details stay cached, in minutes
    #[serde(default = "default_detail_ttl")]
    pub detail_ttl_minutes: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Web server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u32,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// City used when none is given
    #[serde(default = "default_city")]
    pub city: String,
    /// Place search keyword for attractions
    #[serde(default = "default_keyword")]
    pub keyword: String,
    /// Reorder attractions into a nearest-neighbor route by default
    #[serde(default)]
    pub optimize_route: bool,
}

// Default value functions
fn default_places_base_url() -> String {
    "https://api.map.baidu.com".to_string()
}

fn default_places_page_size() -> u32 {
    10
}

fn default_places_timeout() -> u32 {
    10
}

fn default_places_max_retries() -> u32 {
    2
}

fn default_nearby_radius() -> u32 {
    1000
}

fn default_nearby_page_size() -> u32 {
    2
}

fn default_weather_hosts() -> Vec<String> {
    vec![
        "https://devapi.qweather.com".to_string(),
        "https://api.qweather.com".to_string(),
    ]
}

fn default_weather_lang() -> String {
    "zh".to_string()
}

fn default_weather_timeout() -> u32 {
    3
}

fn default_reviews_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_reviews_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_reviews_timeout() -> u32 {
    20
}

fn default_reviews_max_retries() -> u32 {
    1
}

fn default_detail_ttl() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_request_timeout() -> u32 {
    30
}

fn default_city() -> String {
    "北京".to_string()
}

fn default_keyword() -> String {
    "旅游景点".to_string()
}

impl Default for PlaceSearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_places_base_url(),
            page_size: default_places_page_size(),
            timeout_seconds: default_places_timeout(),
            max_retries: default_places_max_retries(),
            use_system_proxy: false,
        }
    }
}

impl Default for NearbyConfig {
    fn default() -> Self {
        Self {
            radius_m: default_nearby_radius(),
            page_size: default_nearby_page_size(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            hosts: default_weather_hosts(),
            lang: default_weather_lang(),
            timeout_seconds: default_weather_timeout(),
            max_retries: 0,
            use_system_proxy: false,
        }
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_reviews_base_url(),
            model: default_reviews_model(),
            timeout_seconds: default_reviews_timeout(),
            max_retries: default_reviews_max_retries(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            detail_ttl_minutes: default_detail_ttl(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            city: default_city(),
            keyword: default_keyword(),
            optimize_route: false,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn detail_ttl(&self) -> Duration {
        Duration::from_secs(u64::from(self.detail_ttl_minutes) * 60)
    }
}

impl TourConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. CITYTOUR_WEATHER__API_KEY
        builder = builder.add_source(
            Environment::with_prefix("CITYTOUR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TourConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("citytour").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.places.base_url.is_empty() {
            self.places.base_url = default_places_base_url();
        }
        if self.places.page_size == 0 {
            self.places.page_size = default_places_page_size();
        }
        if self.places.timeout_seconds == 0 {
            self.places.timeout_seconds = default_places_timeout();
        }
        if self.nearby.radius_m == 0 {
            self.nearby.radius_m = default_nearby_radius();
        }
        if self.nearby.page_size == 0 {
            self.nearby.page_size = default_nearby_page_size();
        }
        if self.weather.hosts.is_empty() {
            self.weather.hosts = default_weather_hosts();
        }
        if self.weather.lang.is_empty() {
            self.weather.lang = default_weather_lang();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.reviews.base_url.is_empty() {
            self.reviews.base_url = default_reviews_base_url();
        }
        if self.reviews.model.is_empty() {
            self.reviews.model = default_reviews_model();
        }
        if self.reviews.timeout_seconds == 0 {
            self.reviews.timeout_seconds = default_reviews_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.port == 0 {
            self.server.port = default_server_port();
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_request_timeout();
        }
        if self.defaults.city.trim().is_empty() {
            self.defaults.city = default_city();
        }
        if self.defaults.keyword.trim().is_empty() {
            self.defaults.keyword = default_keyword();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        let keys = [
            ("Place search", &self.places.api_key),
            ("Weather", &self.weather.api_key),
            ("Review", &self.reviews.api_key),
        ];

        for (label, key) in keys {
            let Some(key) = key else { continue };

            if key.is_empty() {
                return Err(TourError::config(format!(
                    "{label} API key cannot be empty if provided. Either remove it or provide a valid key."
                ))
                .into());
            }

            if key.len() < 8 {
                return Err(TourError::config(format!(
                    "{label} API key appears to be invalid (too short). Please check your API key."
                ))
                .into());
            }

            if key.len() > 200 {
                return Err(TourError::config(format!(
                    "{label} API key appears to be invalid (too long). Please check your API key."
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.places.page_size > 20 {
            return Err(TourError::config("Place search page size cannot exceed 20").into());
        }

        if self.nearby.page_size > 20 {
            return Err(TourError::config("Nearby page size cannot exceed 20").into());
        }

        if self.nearby.radius_m > 50_000 {
            return Err(TourError::config("Nearby radius cannot exceed 50000 m").into());
        }

        let timeouts = [
            self.places.timeout_seconds,
            self.weather.timeout_seconds,
            self.reviews.timeout_seconds,
            self.server.request_timeout_seconds,
        ];
        if timeouts.iter().any(|&t| t > 300) {
            return Err(TourError::config("Timeouts cannot exceed 300 seconds").into());
        }

        let retries = [
            self.places.max_retries,
            self.weather.max_retries,
            self.reviews.max_retries,
        ];
        if retries.iter().any(|&r| r > 10) {
            return Err(TourError::config("Max retries cannot exceed 10").into());
        }

        if self.session.detail_ttl_minutes > 24 * 60 {
            return Err(TourError::config(
                "Detail cache TTL cannot exceed 1440 minutes (1 day)",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TourError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TourError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let urls = std::iter::once(("Place search base URL", &self.places.base_url))
            .chain(std::iter::once(("Review base URL", &self.reviews.base_url)))
            .chain(self.weather.hosts.iter().map(|host| ("Weather host", host)));
        for (label, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TourError::config(format!(
                    "{label} must be a valid HTTP or HTTPS URL, got '{url}'"
                ))
                .into());
            }
        }

        Ok(())
    }
}
