//! PostgreSQL implementation of the persistence layer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::MetricStore;
use crate::domain::{HealthMetric, MetricId, NewMetric};
use crate::error::GatewayError;

/// Row tuple for `health_metrics` queries, in column order.
type MetricRow = (
    Uuid,
    DateTime<Utc>,
    Option<i32>,
    Option<i32>,
    Option<f64>,
    Option<i32>,
    Option<i32>,
    Option<i32>,
    Option<i32>,
    serde_json::Value,
);

/// PostgreSQL-backed metric store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresMetricStore {
    pool: PgPool,
}

impl PostgresMetricStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetricStore for PostgresMetricStore {
    async fn insert(&self, record: &NewMetric) -> Result<MetricId, GatewayError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO health_metrics \
             (recorded_at, steps, sleep_minutes, weight_kg, resting_hr, energy_level, \
              exercise_minutes, active_energy_kcal, raw_data) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING id",
        )
        .bind(record.recorded_at)
        .bind(record.steps)
        .bind(record.sleep_minutes)
        .bind(record.weight_kg)
        .bind(record.resting_hr)
        .bind(record.energy_level)
        .bind(record.exercise_minutes)
        .bind(record.active_energy_kcal)
        .bind(&record.raw_data)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(MetricId::from_uuid(id))
    }

    async fn recorded_since(&self, since: DateTime<Utc>) -> Result<Vec<HealthMetric>, GatewayError> {
        let rows = sqlx::query_as::<_, MetricRow>(
            "SELECT id, recorded_at, steps, sleep_minutes, weight_kg, resting_hr, \
             energy_level, exercise_minutes, active_energy_kcal, raw_data \
             FROM health_metrics WHERE recorded_at >= $1 ORDER BY recorded_at DESC",
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(
                |(
                    id,
                    recorded_at,
                    steps,
                    sleep_minutes,
                    weight_kg,
                    resting_hr,
                    energy_level,
                    exercise_minutes,
                    active_energy_kcal,
                    raw_data,
                )| HealthMetric {
                    id: MetricId::from_uuid(id),
                    recorded_at,
                    steps,
                    sleep_minutes,
                    weight_kg,
                    resting_hr,
                    energy_level,
                    exercise_minutes,
                    active_energy_kcal,
                    raw_data,
                },
            )
            .collect())
    }
}
