//! System endpoints: service health and the ingest field catalog.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// One accepted webhook payload field.
#[derive(Debug, Serialize, ToSchema)]
struct IngestFieldInfo {
    field: &'static str,
    stored_as: &'static str,
    unit: &'static str,
    rounded: bool,
}

/// `GET /config/ingest-fields` — Catalog of accepted payload fields.
///
/// Documents the webhook contract for whoever maintains the phone
/// automation: which fields are extracted, where they land, and which get
/// rounded on the way in.
#[utoipa::path(
    get,
    path = "/config/ingest-fields",
    tag = "System",
    summary = "List accepted ingest payload fields",
    description = "Returns the payload fields the ingestion endpoint extracts, the canonical column each is stored as, and whether the value is rounded. Unlisted fields are kept only in the verbatim raw_data audit copy.",
    responses(
        (status = 200, description = "Ingest field catalog", body = Vec<IngestFieldInfo>),
    )
)]
pub async fn ingest_fields_handler() -> impl IntoResponse {
    let fields = vec![
        IngestFieldInfo {
            field: "date",
            stored_as: "recorded_at",
            unit: "ISO 8601 timestamp",
            rounded: false,
        },
        IngestFieldInfo {
            field: "steps",
            stored_as: "steps",
            unit: "count",
            rounded: true,
        },
        IngestFieldInfo {
            field: "sleep_minutes",
            stored_as: "sleep_minutes",
            unit: "minutes",
            rounded: true,
        },
        IngestFieldInfo {
            field: "weight",
            stored_as: "weight_kg",
            unit: "kilograms",
            rounded: false,
        },
        IngestFieldInfo {
            field: "heart_rate",
            stored_as: "resting_hr",
            unit: "beats per minute",
            rounded: true,
        },
        IngestFieldInfo {
            field: "energy",
            stored_as: "energy_level",
            unit: "0–10 scale",
            rounded: true,
        },
        IngestFieldInfo {
            field: "exercise_time",
            stored_as: "exercise_minutes",
            unit: "minutes",
            rounded: true,
        },
        IngestFieldInfo {
            field: "active_energy",
            stored_as: "active_energy_kcal",
            unit: "kilocalories",
            rounded: true,
        },
    ];
    (StatusCode::OK, Json(fields))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/ingest-fields", get(ingest_fields_handler))
}
