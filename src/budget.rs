//! Trip cost estimate

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::TourError;

/// Per-unit prices and party size for a cost estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetInput {
    pub travellers: u32,
    pub days: u32,
    #[serde(default)]
    pub hotel_per_night: f64,
    #[serde(default)]
    pub food_per_person_day: f64,
    #[serde(default)]
    pub transport_per_day: f64,
    #[serde(default)]
    pub ticket_per_person: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetBreakdown {
    pub accommodation: f64,
    pub food: f64,
    pub transport: f64,
    pub tickets: f64,
    pub total: f64,
    pub per_person: f64,
}

impl BudgetInput {
    fn validate(&self) -> Result<()> {
        if self.travellers < 1 {
            return Err(TourError::validation("travellers must be at least 1"));
        }
        if self.days < 1 {
            return Err(TourError::validation("days must be at least 1"));
        }

        let amounts = [
            ("hotel_per_night", self.hotel_per_night),
            ("food_per_person_day", self.food_per_person_day),
            ("transport_per_day", self.transport_per_day),
            ("ticket_per_person", self.ticket_per_person),
        ];
        for (field, amount) in amounts {
            if !amount.is_finite() || amount < 0.0 {
                return Err(TourError::validation(format!(
                    "{field} must be a non-negative amount, got {amount}"
                )));
            }
        }
        Ok(())
    }
}

/// Estimate the cost of a trip visiting `stops` attractions.
///
/// A trip of `days` days needs `days - 1` hotel nights.
pub fn calculate(input: &BudgetInput, stops: usize) -> Result<BudgetBreakdown> {
    input.validate()?;

    let travellers = f64::from(input.travellers);
    let days = f64::from(input.days);
    let nights = f64::from(input.days - 1);

    let accommodation = input.hotel_per_night * nights;
    let food = input.food_per_person_day * travellers * days;
    let transport = input.transport_per_day * days;
    let tickets = input.ticket_per_person * stops as f64 * travellers;
    let total = accommodation + food + transport + tickets;

    Ok(BudgetBreakdown {
        accommodation,
        food,
        transport,
        tickets,
        total,
        per_person: total / travellers,
    })
}
