use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::budget::{self, BudgetBreakdown, BudgetInput};
use crate::config::DefaultsConfig;
use crate::error::TourError;
use crate::export::render_itinerary;
use crate::map::MapView;
use crate::models::{PlaceDetails, Waypoint, WaypointId};
use crate::packing::{PackingItem, packing_list};
use crate::planner::{PlanRequest, TripPlan, TripPlanner};
use crate::session::Session;

/// State shared by every request handler
pub struct AppState {
    pub planner: TripPlanner,
    pub session: Mutex<Session>,
    pub defaults: DefaultsConfig,
}

impl AppState {
    #[must_use]
    pub fn new(planner: TripPlanner, session: Session, defaults: DefaultsConfig) -> Self {
        Self {
            planner,
            session: Mutex::new(session),
            defaults,
        }
    }
}

/// [`TourError`] rendered as a JSON error response
pub struct ApiError(TourError);

impl From<TourError> for ApiError {
    fn from(error: TourError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            TourError::Validation { .. } => StatusCode::BAD_REQUEST,
            TourError::NoPlan | TourError::UnknownStop { .. } | TourError::NoAttractions { .. } => {
                StatusCode::NOT_FOUND
            }
            TourError::Config { .. } => {
                error!("Request failed: {}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.0.user_message() }))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Deserialize)]
pub struct PlanQuery {
    pub city: Option<String>,
    pub keyword: Option<String>,
    pub optimize: Option<bool>,
    pub date: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct PlanResponse {
    pub plan: TripPlan,
    pub map: Option<MapView>,
}

#[derive(Serialize)]
pub struct StopResponse {
    pub stop: Waypoint,
    pub index: usize,
    pub details: PlaceDetails,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/plan", get(get_plan))
        .route("/stops/{id}", get(get_stop))
        .route("/map", get(get_map))
        .route("/packing", get(get_packing))
        .route("/budget", post(post_budget))
        .route("/export", get(get_export))
        .with_state(state)
}

async fn get_plan(State(state): State<Arc<AppState>>, Query(query): Query<PlanQuery>) -> ApiResult<Json<PlanResponse>> {
    let request = PlanRequest {
        city: query.city.unwrap_or_else(|| state.defaults.city.clone()),
        keyword: query.keyword.unwrap_or_else(|| state.defaults.keyword.clone()),
        start_date: query.date.unwrap_or_else(|| Local::now().date_naive()),
        optimize: query.optimize.unwrap_or(state.defaults.optimize_route),
    };

    let plan = state.planner.plan(&request).await?;
    let map = MapView::from_route(&plan.stops, 0);
    state.session.lock().await.install_plan(plan.clone());
    info!("Installed plan for {} ({} stops)", plan.city, plan.stops.len());

    Ok(Json(PlanResponse { plan, map }))
}

async fn get_stop(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResult<Json<StopResponse>> {
    let id = WaypointId::new(id);
    let (stop, index) = {
        let mut session = state.session.lock().await;
        let index = session.select(&id)?;
        let stop = session
            .selected_stop()
            .cloned()
            .ok_or_else(|| TourError::UnknownStop { id: id.to_string() })?;
        (stop, index)
    };

    let details = state.planner.details_cached(&state.session, &id).await?;
    Ok(Json(StopResponse { stop, index, details }))
}

async fn get_map(State(state): State<Arc<AppState>>) -> ApiResult<Json<Option<MapView>>> {
    let session = state.session.lock().await;
    let plan = session.require_plan()?;
    Ok(Json(MapView::from_route(&plan.stops, session.selected_index())))
}

async fn get_packing(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<PackingItem>>> {
    let session = state.session.lock().await;
    let plan = session.require_plan()?;
    Ok(Json(packing_list(&plan.forecast.days)))
}

async fn post_budget(
    State(state): State<Arc<AppState>>,
    Json(input): Json<BudgetInput>,
) -> ApiResult<Json<BudgetBreakdown>> {
    let mut session = state.session.lock().await;
    let stops = session.require_plan()?.stops.len();
    let breakdown = budget::calculate(&input, stops)?;
    session.store_budget(breakdown.clone());
    Ok(Json(breakdown))
}

async fn get_export(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let session = state.session.lock().await;
    let plan = session.require_plan()?;
    let text = render_itinerary(
        plan,
        &session.all_cached_details(),
        &packing_list(&plan.forecast.days),
        session.budget(),
    );
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text))
}
