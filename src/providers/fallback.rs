//! Substitutes used when a collaborator fails

use chrono::{Days, NaiveDate};
use rand::RngExt;
use tracing::warn;

use super::WeatherProvider;
use crate::models::{Forecast, ForecastDay, ForecastSource, GeoPoint, Review};

pub const MOCK_FORECAST_DAYS: u64 = 3;
pub const MOCK_WIND: &str = "微风";
/// Glyph and description are picked together so they never contradict
const MOCK_SKIES: [(&str, &str); 3] = [("🌞", "晴朗"), ("⛅", "多云"), ("🌧", "小雨")];

/// Fabricated forecast starting at `today`
#[must_use]
pub fn mock_forecast(today: NaiveDate) -> Vec<ForecastDay> {
    let mut rng = rand::rng();
    (0..MOCK_FORECAST_DAYS)
        .map(|offset| {
            let date = today.checked_add_days(Days::new(offset)).unwrap_or(today);
            let high_temp: i32 = rng.random_range(20..=28);
            let (icon, description) = MOCK_SKIES[rng.random_range(0..MOCK_SKIES.len())];
            ForecastDay {
                date: date.format("%m-%d").to_string(),
                icon: icon.to_string(),
                description: description.to_string(),
                low_temp: high_temp - 8,
                high_temp,
                wind: MOCK_WIND.to_string(),
            }
        })
        .collect()
}

/// Ask `provider` for a forecast, falling back to [`mock_forecast`]
pub async fn forecast_or_mock(provider: &dyn WeatherProvider, at: GeoPoint, today: NaiveDate) -> Forecast {
    match provider.forecast(at).await {
        Ok(days) => Forecast {
            days,
            source: ForecastSource::Api,
        },
        Err(e) => {
            warn!("Weather unavailable, using placeholder forecast: {}", e);
            Forecast {
                days: mock_forecast(today),
                source: ForecastSource::Mock,
            }
        }
    }
}

#[must_use]
pub fn fallback_reviews() -> Vec<Review> {
    vec![Review::fallback()]
}
