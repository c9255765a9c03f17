//! Per-session working state: the current plan, the selected stop and the
//! detail cache.
//!
//! Detail entries are keyed by [`WaypointId`], never by display name, and are
//! dropped whenever a new plan is installed.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::Result;
use crate::budget::BudgetBreakdown;
use crate::error::TourError;
use crate::models::{PlaceDetails, Waypoint, WaypointId};
use crate::planner::TripPlan;

#[derive(Debug, Clone)]
struct CachedDetails {
    details: PlaceDetails,
    stored_at: Instant,
}

#[derive(Debug)]
pub struct Session {
    plan: Option<TripPlan>,
    selected: usize,
    details: HashMap<WaypointId, CachedDetails>,
    budget: Option<BudgetBreakdown>,
    ttl: Duration,
}

impl Session {
    /// Empty session whose detail entries live for `ttl`
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            plan: None,
            selected: 0,
            details: HashMap::new(),
            budget: None,
            ttl,
        }
    }

    /// Replace the working set with `plan`
    pub fn install_plan(&mut self, plan: TripPlan) {
        debug!("Installing plan for {} with {} stops", plan.city, plan.stops.len());
        self.plan = Some(plan);
        self.selected = 0;
        self.details.clear();
        self.budget = None;
    }

    #[must_use]
    pub fn plan(&self) -> Option<&TripPlan> {
        self.plan.as_ref()
    }

    /// The current plan, or [`TourError::NoPlan`]
    pub fn require_plan(&self) -> Result<&TripPlan> {
        self.plan.as_ref().ok_or(TourError::NoPlan)
    }

    /// Look up a stop of the current plan by id
    #[must_use]
    pub fn stop(&self, id: &WaypointId) -> Option<&Waypoint> {
        self.plan.as_ref()?.stops.iter().find(|stop| stop.id() == id)
    }

    /// Mark the stop with `id` as selected and return its position in the route
    pub fn select(&mut self, id: &WaypointId) -> Result<usize> {
        let plan = self.require_plan()?;
        let index = plan
            .stops
            .iter()
            .position(|stop| stop.id() == id)
            .ok_or_else(|| TourError::UnknownStop { id: id.to_string() })?;
        self.selected = index;
        Ok(index)
    }

    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected_stop(&self) -> Option<&Waypoint> {
        self.plan.as_ref()?.stops.get(self.selected)
    }

    /// Cached details for `id`, if present and younger than the TTL
    #[must_use]
    pub fn cached_details(&self, id: &WaypointId) -> Option<&PlaceDetails> {
        self.details
            .get(id)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| &entry.details)
    }

    pub fn store_details(&mut self, id: WaypointId, details: PlaceDetails) {
        let ttl = self.ttl;
        self.details.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        self.details.insert(
            id,
            CachedDetails {
                details,
                stored_at: Instant::now(),
            },
        );
    }

    /// Last budget computed for the current plan
    #[must_use]
    pub fn budget(&self) -> Option<&BudgetBreakdown> {
        self.budget.as_ref()
    }

    pub fn store_budget(&mut self, budget: BudgetBreakdown) {
        self.budget = Some(budget);
    }

    /// Every unexpired detail entry, in route order
    #[must_use]
    pub fn all_cached_details(&self) -> Vec<(&Waypoint, &PlaceDetails)> {
        let Some(plan) = self.plan.as_ref() else {
            return Vec::new();
        };
        plan.stops
            .iter()
            .filter_map(|stop| self.cached_details(stop.id()).map(|details| (stop, details)))
            .collect()
    }
}
