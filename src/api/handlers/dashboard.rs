//! Dashboard read handler.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Local;

use crate::api::dto::DashboardResponse;
use crate::app_state::AppState;

/// `GET /dashboard` — The aggregated daily dashboard view.
///
/// Recomputed on every call from the trailing window of records. This
/// endpoint never fails: a storage read error degrades to an empty view so
/// the frontend keeps rendering.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Dashboard",
    summary = "Aggregated daily dashboard",
    description = "Returns the trailing-window records (most recent first), the latest record for today and yesterday, and one per-day aggregate bucket for every window day including empty ones.",
    responses(
        (status = 200, description = "Dashboard view", body = DashboardResponse),
    )
)]
pub async fn get_dashboard(State(state): State<AppState>) -> impl IntoResponse {
    // Local::now() fixes both "today" and the timezone day keys are
    // derived in.
    let dashboard = state.metric_service.dashboard(&Local::now()).await;
    Json(DashboardResponse::from(dashboard))
}

/// Dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}
