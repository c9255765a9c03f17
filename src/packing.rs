//! Packing suggestions derived from the forecast

use serde::Serialize;

use crate::models::ForecastDay;

/// Temperature below which a warm jacket is suggested
pub const COLD_BELOW_C: i32 = 10;
/// Temperature from which sun protection is suggested
pub const HOT_FROM_C: i32 = 28;
/// Day-night swing from which layers are suggested
pub const LAYERS_SWING_C: i32 = 10;

const ESSENTIALS: [&str; 4] = ["ID card", "Phone charger", "Water bottle", "Comfortable shoes"];

const RAIN_GLYPHS: [&str; 2] = ["🌧", "⛈️"];
const RAIN_WORDS: [&str; 3] = ["雨", "rain", "shower"];
const THUNDER_WORDS: [&str; 2] = ["雷", "thunder"];
const SNOW_WORDS: [&str; 2] = ["雪", "snow"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackingItem {
    pub item: String,
    pub reason: String,
}

fn mentions(day: &ForecastDay, words: &[&str]) -> bool {
    let description = day.description.to_lowercase();
    words.iter().any(|word| description.contains(word))
}

fn is_thunder(day: &ForecastDay) -> bool {
    day.icon == "⛈️" || mentions(day, &THUNDER_WORDS)
}

fn is_wet(day: &ForecastDay) -> bool {
    RAIN_GLYPHS.contains(&day.icon.as_str()) || mentions(day, &RAIN_WORDS) || is_thunder(day)
}

fn is_snowy(day: &ForecastDay) -> bool {
    day.icon == "❄️" || mentions(day, &SNOW_WORDS)
}

#[derive(Default)]
struct PackingList(Vec<PackingItem>);

impl PackingList {
    fn add(&mut self, item: &str, reason: impl Into<String>) {
        if self.0.iter().any(|existing| existing.item == item) {
            return;
        }
        self.0.push(PackingItem {
            item: item.to_string(),
            reason: reason.into(),
        });
    }
}

/// Essentials first, then weather-driven items in a fixed order
#[must_use]
pub fn packing_list(days: &[ForecastDay]) -> Vec<PackingItem> {
    let mut list = PackingList::default();
    for item in ESSENTIALS {
        list.add(item, "Essential");
    }

    if let Some(day) = days.iter().find(|d| is_wet(d)) {
        list.add("Umbrella", format!("{} expected on {}", day.description, day.date));
    }
    if let Some(day) = days.iter().find(|d| is_thunder(d)) {
        list.add(
            "Indoor backup plan",
            format!("Thunderstorms on {}, avoid outdoor activity", day.date),
        );
    }
    if let Some(day) = days.iter().find(|d| is_snowy(d)) {
        list.add("Gloves", format!("Snow expected on {}", day.date));
    }
    if let Some(low) = days.iter().map(|d| d.low_temp).min().filter(|low| *low < COLD_BELOW_C) {
        list.add("Warm jacket", format!("Lows down to {low}°"));
    }
    if let Some(high) = days.iter().map(|d| d.high_temp).max().filter(|high| *high >= HOT_FROM_C) {
        list.add("Sunscreen", format!("Highs up to {high}°"));
        list.add("Sun hat", format!("Highs up to {high}°"));
    }
    if let Some(day) = days.iter().find(|d| d.temperature_swing() >= LAYERS_SWING_C) {
        list.add(
            "Layered clothing",
            format!("{}° swing between day and night on {}", day.temperature_swing(), day.date),
        );
    }

    list.0
}
