//! Daily forecast records as consumed by the planner

use serde::{Deserialize, Serialize};

/// Forecast for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Month-day label, e.g. "10-14"
    pub date: String,
    /// Weather glyph for display
    pub icon: String,
    /// Provider description of the day's weather
    pub description: String,
    /// Minimum temperature in Celsius
    pub low_temp: i32,
    /// Maximum temperature in Celsius
    pub high_temp: i32,
    /// Wind direction / strength text
    pub wind: String,
}

impl ForecastDay {
    /// Format temperature range, e.g. "12°~20°"
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{}°~{}°", self.low_temp, self.high_temp)
    }

    #[must_use]
    pub fn temperature_swing(&self) -> i32 {
        self.high_temp - self.low_temp
    }
}

/// Where the forecast days came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastSource {
    Api,
    Mock,
}

/// Multi-day forecast, either from the provider or locally fabricated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub days: Vec<ForecastDay>,
    pub source: ForecastSource,
}

impl Forecast {
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.source == ForecastSource::Mock
    }
}
