//! vitals-gateway server entry point.
//!
//! Starts the Axum HTTP server with the webhook ingestion and dashboard
//! endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use vitals_gateway::api;
use vitals_gateway::app_state::AppState;
use vitals_gateway::config::GatewayConfig;
use vitals_gateway::persistence::{MetricStore, PostgresMetricStore};
use vitals_gateway::service::MetricService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting vitals-gateway");
    if config.api_secret.is_none() {
        tracing::warn!("API_SECRET_KEY is not set; ingestion requests will be rejected with 500");
    }

    // Build persistence layer
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Build service layer
    let store: Arc<dyn MetricStore> = Arc::new(PostgresMetricStore::new(pool));
    let metric_service = Arc::new(MetricService::new(store, config.dashboard_window_days));

    // Build application state
    let app_state = AppState {
        metric_service,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
