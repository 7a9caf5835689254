//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All endpoints are mounted under `/api/v1` except the system routes
//! (`/health`, `/config/ingest-fields`), which live at the root.

pub mod dto;
pub mod handlers;

use axum::Router;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use chrono::{DateTime, Utc};
    use tower::ServiceExt;

    use super::*;
    use crate::config::GatewayConfig;
    use crate::domain::{HealthMetric, MetricId, NewMetric};
    use crate::error::GatewayError;
    use crate::persistence::MetricStore;
    use crate::service::MetricService;

    /// Store fake standing in for an unreachable database.
    #[derive(Debug)]
    struct BrokenStore;

    #[async_trait]
    impl MetricStore for BrokenStore {
        async fn insert(&self, _record: &NewMetric) -> Result<MetricId, GatewayError> {
            Err(GatewayError::PersistenceError("store offline".to_string()))
        }

        async fn recorded_since(
            &self,
            _since: DateTime<Utc>,
        ) -> Result<Vec<HealthMetric>, GatewayError> {
            Err(GatewayError::PersistenceError("store offline".to_string()))
        }
    }

    fn test_state(api_secret: Option<&str>) -> AppState {
        let Ok(listen_addr) = "127.0.0.1:0".parse() else {
            panic!("valid listen addr");
        };
        let config = GatewayConfig {
            listen_addr,
            database_url: String::new(),
            database_max_connections: 1,
            database_min_connections: 1,
            database_connect_timeout_secs: 1,
            api_secret: api_secret.map(ToString::to_string),
            dashboard_window_days: 7,
        };
        AppState {
            metric_service: Arc::new(MetricService::new(Arc::new(BrokenStore), 7)),
            config: Arc::new(config),
        }
    }

    async fn send(state: AppState, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let app = build_router().with_state(state);
        let Ok(response) = app.oneshot(request).await else {
            panic!("router call failed");
        };
        let status = response.status();
        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("reading body failed");
        };
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    fn ingest_request(secret: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/v1/hooks/ingest")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(secret) = secret {
            builder = builder.header("x-api-secret", secret);
        }
        let Ok(request) = builder.body(Body::from(body.to_string())) else {
            panic!("building request failed");
        };
        request
    }

    #[tokio::test]
    async fn health_endpoint_responds() {
        let Ok(request) = Request::builder().uri("/health").body(Body::empty()) else {
            panic!("building request failed");
        };
        let (status, body) = send(test_state(Some("s3cret")), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.get("status"), Some(&serde_json::json!("healthy")));
    }

    #[tokio::test]
    async fn dashboard_degrades_to_empty_view_on_store_failure() {
        let Ok(request) = Request::builder().uri("/api/v1/dashboard").body(Body::empty()) else {
            panic!("building request failed");
        };
        let (status, body) = send(test_state(Some("s3cret")), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.get("recent"), Some(&serde_json::json!([])));
        assert_eq!(body.get("today"), Some(&serde_json::Value::Null));
        assert_eq!(body.get("yesterday"), Some(&serde_json::Value::Null));
        assert_eq!(body.get("byDay"), Some(&serde_json::json!([])));
    }

    #[tokio::test]
    async fn ingest_without_secret_is_unauthorized() {
        let request = ingest_request(None, r#"{"steps": 100}"#);
        let (status, _) = send(test_state(Some("s3cret")), request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn ingest_with_wrong_secret_is_unauthorized() {
        let request = ingest_request(Some("wrong"), r#"{"steps": 100}"#);
        let (status, _) = send(test_state(Some("s3cret")), request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn ingest_with_unset_server_secret_is_500() {
        let request = ingest_request(Some("anything"), r#"{"steps": 100}"#);
        let (status, body) = send(test_state(None), request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body.pointer("/error/code"),
            Some(&serde_json::json!(3002))
        );
    }

    #[tokio::test]
    async fn ingest_invalid_date_is_400() {
        let request = ingest_request(Some("s3cret"), r#"{"date": "not-a-date"}"#);
        let (status, body) = send(test_state(Some("s3cret")), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body.pointer("/error/code"),
            Some(&serde_json::json!(1002))
        );
    }

    #[tokio::test]
    async fn ingest_storage_failure_surfaces_the_message() {
        let request = ingest_request(Some("s3cret"), r#"{"steps": 100}"#);
        let (status, body) = send(test_state(Some("s3cret")), request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body.pointer("/error/message"),
            Some(&serde_json::json!("persistence error: store offline"))
        );
    }
}
