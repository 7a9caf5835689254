//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::service::MetricService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Metric service for ingestion and dashboard reads.
    pub metric_service: Arc<MetricService>,
    /// Gateway configuration (shared secret, window size).
    pub config: Arc<GatewayConfig>,
}
