use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/day", get(handlers::get_day))
        .route("/api/day/previous", post(handlers::previous_day))
        .route("/api/day/next", post(handlers::next_day))
        .route("/api/day/goto", post(handlers::go_to_day))
        .route("/api/entries", post(handlers::set_entry))
        .route("/api/entries/add", post(handlers::add_entry))
        .route("/api/entries/remove", post(handlers::remove_entry))
        .route("/api/trend", get(handlers::get_trend))
        .route("/api/chart", get(handlers::get_chart))
        .route(
            "/api/settings",
            get(handlers::get_settings).put(handlers::put_settings),
        )
        .route("/api/drawer", get(handlers::get_drawer))
        .route("/api/drawer/swipe", post(handlers::swipe_drawer))
        .route("/api/drawer/close", post(handlers::close_drawer))
        .with_state(state)
}
