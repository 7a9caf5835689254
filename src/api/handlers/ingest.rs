//! Webhook ingestion handler.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::IngestResponse;
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// Header carrying the caller's shared secret.
pub const API_SECRET_HEADER: &str = "x-api-secret";

/// `POST /hooks/ingest` — Ingest one health metric reading.
///
/// The body is an arbitrary JSON object; known fields are extracted and
/// normalized, the whole payload is retained verbatim for audit. Callers
/// authenticate with the `x-api-secret` header.
///
/// # Errors
///
/// Returns [`GatewayError::MissingSecret`] when the server has no secret
/// configured, [`GatewayError::Unauthorized`] on a bad or absent header,
/// [`GatewayError::InvalidDate`] on an unparseable `date` field, and
/// [`GatewayError::PersistenceError`] when the insert fails.
#[utoipa::path(
    post,
    path = "/api/v1/hooks/ingest",
    tag = "Ingestion",
    summary = "Ingest a health metric reading",
    description = "Accepts a webhook payload with optional numeric fields (`steps`, `sleep_minutes`, `weight`, `heart_rate`, `energy`, `exercise_time`, `active_energy`) and an optional ISO `date`. Count-like fields are rounded to the nearest integer; the full payload is stored verbatim alongside the typed record.",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Record stored", body = IngestResponse),
        (status = 400, description = "Invalid date format", body = ErrorResponse),
        (status = 401, description = "Bad or missing shared secret", body = ErrorResponse),
        (status = 500, description = "Server misconfiguration or storage failure", body = ErrorResponse),
    )
)]
pub async fn ingest_metric(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<serde_json::Value>,
) -> Result<impl IntoResponse, GatewayError> {
    verify_secret(&headers, state.config.api_secret.as_deref())?;

    let id = state.metric_service.ingest(payload, Utc::now()).await?;

    Ok((
        StatusCode::OK,
        Json(IngestResponse {
            success: true,
            id: id.into(),
        }),
    ))
}

/// Compares the caller-presented secret byte-for-byte against the
/// configured one.
///
/// An unset server-side secret is a deployment fault and reported as such,
/// distinct from a caller presenting the wrong value.
fn verify_secret(headers: &HeaderMap, expected: Option<&str>) -> Result<(), GatewayError> {
    let Some(expected) = expected else {
        tracing::error!("API_SECRET_KEY is not set");
        return Err(GatewayError::MissingSecret);
    };

    let presented = headers
        .get(API_SECRET_HEADER)
        .and_then(|v| v.to_str().ok());

    if presented.map(str::as_bytes) == Some(expected.as_bytes()) {
        Ok(())
    } else {
        Err(GatewayError::Unauthorized)
    }
}

/// Ingestion routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/hooks/ingest", post(ingest_metric))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers_with_secret(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let Ok(header_value) = HeaderValue::from_str(value) else {
            panic!("valid header value");
        };
        headers.insert(API_SECRET_HEADER, header_value);
        headers
    }

    #[test]
    fn matching_secret_is_accepted() {
        let headers = headers_with_secret("hunter2");
        assert!(verify_secret(&headers, Some("hunter2")).is_ok());
    }

    #[test]
    fn mismatched_secret_is_unauthorized() {
        let headers = headers_with_secret("wrong");
        assert!(matches!(
            verify_secret(&headers, Some("hunter2")),
            Err(GatewayError::Unauthorized)
        ));
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let headers = HeaderMap::new();
        assert!(matches!(
            verify_secret(&headers, Some("hunter2")),
            Err(GatewayError::Unauthorized)
        ));
    }

    #[test]
    fn unset_server_secret_is_a_misconfiguration_not_a_401() {
        let headers = headers_with_secret("hunter2");
        assert!(matches!(
            verify_secret(&headers, None),
            Err(GatewayError::MissingSecret)
        ));
    }
}
