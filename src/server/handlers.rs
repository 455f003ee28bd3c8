use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::llm::ChatModel;
use crate::menu::MenuItem;
use crate::places::{PlacesApi, Restaurant};
use crate::planner::{CityResponse, CountryResponse, DateResponse, HostelInfo, PlannerStats, TripPlanner};

use super::state::AppState;
use super::static_files;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

// ─── Planner access ──────────────────────────────────────────────

/// Run a planner call on the blocking pool; the outbound HTTP clients block.
async fn with_planner<P, M, T, F>(state: Arc<AppState<P, M>>, label: &'static str, f: F) -> Result<Json<T>, ApiError>
where
    P: PlacesApi + Send + 'static,
    M: ChatModel + Send + 'static,
    T: Send + 'static,
    F: FnOnce(&mut TripPlanner<P, M>) -> T + Send + 'static,
{
    let start = Instant::now();
    let result = tokio::task::spawn_blocking(move || -> Result<T, ApiError> {
        let mut planner = state
            .planner
            .lock()
            .map_err(|_| api_error(StatusCode::INTERNAL_SERVER_ERROR, "Planner state is poisoned"))?;
        Ok(f(&mut *planner))
    })
    .await
    .map_err(|e| {
        error!(label, error = %e, "planner task failed");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "Planner task failed")
    })?;

    info!(label, elapsed_ms = start.elapsed().as_secs_f64() * 1000.0, "handled");
    result.map(Json)
}

// ─── Static file handlers ────────────────────────────────────────

pub async fn index() -> Html<&'static str> {
    Html(static_files::INDEX_HTML)
}

pub async fn script() -> Response {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        static_files::APP_JS,
    )
        .into_response()
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ─── Trip settings ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ValueBody {
    pub value: String,
}

pub async fn set_country<P, M>(
    State(state): State<Arc<AppState<P, M>>>,
    Json(body): Json<ValueBody>,
) -> Result<Json<CountryResponse>, ApiError>
where
    P: PlacesApi + Send + 'static,
    M: ChatModel + Send + 'static,
{
    with_planner(state, "POST /api/country", move |p| p.set_country(&body.value)).await
}

pub async fn set_city<P, M>(
    State(state): State<Arc<AppState<P, M>>>,
    Json(body): Json<ValueBody>,
) -> Result<Json<CityResponse>, ApiError>
where
    P: PlacesApi + Send + 'static,
    M: ChatModel + Send + 'static,
{
    with_planner(state, "POST /api/city", move |p| p.set_city(&body.value)).await
}

pub async fn set_date<P, M>(
    State(state): State<Arc<AppState<P, M>>>,
    Json(body): Json<ValueBody>,
) -> Result<Json<DateResponse>, ApiError>
where
    P: PlacesApi + Send + 'static,
    M: ChatModel + Send + 'static,
{
    with_planner(state, "POST /api/date", move |p| p.set_date(&body.value)).await
}

// ─── Discovery ───────────────────────────────────────────────────

pub async fn hostels<P, M>(State(state): State<Arc<AppState<P, M>>>) -> Result<Json<HostelInfo>, ApiError>
where
    P: PlacesApi + Send + 'static,
    M: ChatModel + Send + 'static,
{
    with_planner(state, "GET /api/hostels", |p| p.hostel_info()).await
}

pub async fn restaurants<P, M>(
    State(state): State<Arc<AppState<P, M>>>,
    Path(hostel): Path<usize>,
) -> Result<Json<Vec<Restaurant>>, ApiError>
where
    P: PlacesApi + Send + 'static,
    M: ChatModel + Send + 'static,
{
    with_planner(state, "GET /api/hostels/{hostel}/restaurants", move |p| {
        p.restaurants_for_hostel(hostel)
    })
    .await
}

pub async fn menu<P, M>(
    State(state): State<Arc<AppState<P, M>>>,
    Path((hostel, restaurant)): Path<(usize, usize)>,
) -> Result<Json<Vec<MenuItem>>, ApiError>
where
    P: PlacesApi + Send + 'static,
    M: ChatModel + Send + 'static,
{
    with_planner(state, "GET /api/hostels/{hostel}/restaurants/{restaurant}/menu", move |p| {
        p.restaurant_menu(restaurant, hostel)
    })
    .await
}

pub async fn stats<P, M>(State(state): State<Arc<AppState<P, M>>>) -> Result<Json<PlannerStats>, ApiError>
where
    P: PlacesApi + Send + 'static,
    M: ChatModel + Send + 'static,
{
    with_planner(state, "GET /api/stats", |p| p.stats()).await
}
