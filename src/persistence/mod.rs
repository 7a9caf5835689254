//! Persistence layer: PostgreSQL storage of canonical metric records.
//!
//! Provides the [`MetricStore`] trait for durable storage of ingested
//! records. The concrete implementation uses `sqlx::PgPool` for async
//! PostgreSQL access; the trait seam exists so the service layer can be
//! exercised against in-memory fakes.

pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use postgres::PostgresMetricStore;

use crate::domain::{HealthMetric, MetricId, NewMetric};
use crate::error::GatewayError;

/// Durable storage for canonical metric records.
///
/// Records are insert-only: no update or delete operations exist.
#[async_trait]
pub trait MetricStore: Send + Sync + std::fmt::Debug {
    /// Inserts a normalized record and returns its storage-assigned ID.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on storage failure.
    async fn insert(&self, record: &NewMetric) -> Result<MetricId, GatewayError>;

    /// Returns all records recorded at or after `since`, ordered by
    /// `recorded_at` descending (most recent first).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on storage failure.
    async fn recorded_since(&self, since: DateTime<Utc>) -> Result<Vec<HealthMetric>, GatewayError>;
}
