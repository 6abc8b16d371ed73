use crate::chart::{render_svg, ChartSurface};
use crate::errors::{AppError, AppJson};
use crate::models::{
    AddEntryRequest, ChartQuery, DayResponse, DrawerResponse, GoToRequest, RemoveEntryRequest,
    SetEntryRequest, SettingsRequest, SettingsResponse, SwipeRequest, TrendResponse,
};
use crate::state::AppState;
use crate::storage::date_key;
use crate::tracker::Tracker;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use chrono::NaiveDate;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let tracker = state.tracker.lock().await;
    Html(render_index(&date_key(tracker.current_date()), tracker.total()))
}

pub async fn get_day(State(state): State<AppState>) -> Json<DayResponse> {
    let tracker = state.tracker.lock().await;
    Json(tracker.day())
}

pub async fn previous_day(State(state): State<AppState>) -> Result<Json<DayResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.previous_day().await?;
    Ok(Json(tracker.day()))
}

pub async fn next_day(State(state): State<AppState>) -> Result<Json<DayResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.next_day().await?;
    Ok(Json(tracker.day()))
}

pub async fn go_to_day(
    State(state): State<AppState>,
    AppJson(payload): AppJson<GoToRequest>,
) -> Result<Json<DayResponse>, AppError> {
    let date = NaiveDate::parse_from_str(payload.date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::bad_request("date must be YYYY-MM-DD"))?;
    let mut tracker = state.tracker.lock().await;
    tracker.go_to(date).await?;
    Ok(Json(tracker.day()))
}

pub async fn set_entry(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SetEntryRequest>,
) -> Result<Json<DayResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker
        .set_entry(payload.group, payload.entry, &payload.value)
        .await?;
    Ok(Json(tracker.day()))
}

pub async fn add_entry(
    State(state): State<AppState>,
    AppJson(payload): AppJson<AddEntryRequest>,
) -> Result<Json<DayResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.add_entry(payload.group).await?;
    Ok(Json(tracker.day()))
}

pub async fn remove_entry(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RemoveEntryRequest>,
) -> Result<Json<DayResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.remove_entry(payload.group, payload.entry).await?;
    Ok(Json(tracker.day()))
}

pub async fn get_trend(State(state): State<AppState>) -> Result<Json<TrendResponse>, AppError> {
    let tracker = state.tracker.lock().await;
    Ok(Json(TrendResponse {
        date: date_key(tracker.current_date()),
        ideal_calories: tracker.ideal_calories().value(),
        points: tracker.trend()?,
    }))
}

pub async fn get_chart(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Result<impl IntoResponse, AppError> {
    let surface = query.width.map(ChartSurface::new).unwrap_or_default();
    let tracker = state.tracker.lock().await;
    let svg = render_svg(&tracker.chart(surface)?);
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

pub async fn get_settings(State(state): State<AppState>) -> Json<SettingsResponse> {
    let tracker = state.tracker.lock().await;
    Json(SettingsResponse {
        ideal_calories: tracker.ideal_calories(),
    })
}

pub async fn put_settings(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SettingsRequest>,
) -> Result<Json<SettingsResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    let ideal_calories = tracker.set_ideal_calories(&payload.ideal_calories).await?;
    Ok(Json(SettingsResponse { ideal_calories }))
}

pub async fn get_drawer(State(state): State<AppState>) -> Json<DrawerResponse> {
    let tracker = state.tracker.lock().await;
    Json(drawer_response(&tracker))
}

pub async fn swipe_drawer(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SwipeRequest>,
) -> Json<DrawerResponse> {
    let mut tracker = state.tracker.lock().await;
    tracker.drawer_mut().swipe(payload.start_x, payload.end_x);
    Json(drawer_response(&tracker))
}

pub async fn close_drawer(State(state): State<AppState>) -> Json<DrawerResponse> {
    let mut tracker = state.tracker.lock().await;
    tracker.drawer_mut().close();
    Json(drawer_response(&tracker))
}

fn drawer_response(tracker: &Tracker) -> DrawerResponse {
    DrawerResponse {
        open: tracker.drawer().is_open(),
        scroll_locked: tracker.drawer().viewport().is_scroll_locked(),
    }
}
