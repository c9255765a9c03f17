//! Plain-text itinerary export

use crate::budget::BudgetBreakdown;
use crate::models::{NearbyCategory, PlaceDetails, Waypoint, summarize_nearby};
use crate::packing::PackingItem;
use crate::planner::TripPlan;

const RULE: &str = "----------------------------------------";

/// Render the itinerary as plain text.
///
/// `details` holds whatever detail panels were loaded and is matched to stops
/// by id; stops without an entry are listed without details.
#[must_use]
pub fn render_itinerary(
    plan: &TripPlan,
    details: &[(&Waypoint, &PlaceDetails)],
    packing: &[PackingItem],
    budget: Option<&BudgetBreakdown>,
) -> String {
    let mut lines = vec![
        format!("Trip to {}", plan.city),
        format!("Starting {}", plan.start_date.format("%Y-%m-%d")),
        RULE.to_string(),
    ];

    if plan.forecast.is_placeholder() {
        lines.push("Weather (placeholder, live forecast unavailable):".to_string());
    } else {
        lines.push("Weather:".to_string());
    }
    for day in &plan.forecast.days {
        lines.push(format!(
            "  {} {} {} {} {}",
            day.date,
            day.icon,
            day.description,
            day.format_temperature(),
            day.wind
        ));
    }

    lines.push(RULE.to_string());
    let order = if plan.optimized { "optimized" } else { "search order" };
    lines.push(format!("Route ({} stops, {order}):", plan.stops.len()));
    for (index, stop) in plan.stops.iter().enumerate() {
        lines.push(format!("{}. {} ({:.1}★)", index + 1, stop.name(), stop.rating()));
        lines.push(format!("   {}", stop.address()));
        if let Some(leg) = plan.legs.iter().find(|leg| leg.to == index) {
            lines.push(format!("   {:.2} km from previous stop", leg.distance_km));
        }

        if let Some((_, panel)) = details.iter().find(|(s, _)| s.id() == stop.id()) {
            for category in [NearbyCategory::Food, NearbyCategory::Hotel] {
                lines.push(format!("   {}: {}", category.label(), summarize_nearby(panel.nearby(category))));
            }
            for review in &panel.reviews {
                lines.push(format!("   \"{}\" ({}, {})", review.comment, review.author, review.rating));
            }
        }
    }
    lines.push(format!("Total distance: {:.2} km", plan.total_distance_km));

    lines.push(RULE.to_string());
    lines.push("Packing list:".to_string());
    for item in packing {
        lines.push(format!("  [ ] {} ({})", item.item, item.reason));
    }

    if let Some(budget) = budget {
        lines.push(RULE.to_string());
        lines.push("Budget:".to_string());
        lines.push(format!("  Accommodation: {:.2}", budget.accommodation));
        lines.push(format!("  Food:          {:.2}", budget.food));
        lines.push(format!("  Transport:     {:.2}", budget.transport));
        lines.push(format!("  Tickets:       {:.2}", budget.tickets));
        lines.push(format!("  Total:         {:.2}", budget.total));
        lines.push(format!("  Per person:    {:.2}", budget.per_person));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
