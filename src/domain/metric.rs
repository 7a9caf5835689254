//! Canonical metric record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MetricId;

/// A canonical metric record as persisted in the `health_metrics` table.
///
/// One row per ingestion event. Every typed field except `recorded_at` is
/// independently optional: the webhook source sends whatever subset of
/// readings it has, and absence is preserved as `None` rather than zero so
/// the aggregation layer can distinguish "no reading" from "a reading of 0".
///
/// Records are immutable once written; there is no update or delete path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthMetric {
    /// Storage-assigned identifier.
    pub id: MetricId,
    /// When the readings were taken (UTC).
    pub recorded_at: DateTime<Utc>,
    /// Step count for the covered period.
    pub steps: Option<i32>,
    /// Minutes asleep.
    pub sleep_minutes: Option<i32>,
    /// Body weight in kilograms. Real-valued, never rounded.
    pub weight_kg: Option<f64>,
    /// Resting heart rate in beats per minute.
    pub resting_hr: Option<i32>,
    /// Subjective energy level (observed range 0–10).
    pub energy_level: Option<i32>,
    /// Minutes of exercise.
    pub exercise_minutes: Option<i32>,
    /// Active energy burned, in kilocalories.
    pub active_energy_kcal: Option<i32>,
    /// Verbatim copy of the original inbound payload, kept for audit and
    /// debugging. Intentionally schemaless.
    pub raw_data: serde_json::Value,
}

/// A normalized record ready for insertion, before storage has assigned
/// an identifier.
///
/// Produced by [`crate::domain::normalizer::normalize`]; consumed by
/// [`crate::persistence::MetricStore::insert`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewMetric {
    /// When the readings were taken (UTC).
    pub recorded_at: DateTime<Utc>,
    /// Step count, rounded to the nearest integer.
    pub steps: Option<i32>,
    /// Minutes asleep, rounded.
    pub sleep_minutes: Option<i32>,
    /// Body weight in kilograms, passed through unrounded.
    pub weight_kg: Option<f64>,
    /// Resting heart rate, rounded.
    pub resting_hr: Option<i32>,
    /// Subjective energy level, rounded.
    pub energy_level: Option<i32>,
    /// Minutes of exercise, rounded.
    pub exercise_minutes: Option<i32>,
    /// Active energy in kilocalories, rounded.
    pub active_energy_kcal: Option<i32>,
    /// Verbatim copy of the original inbound payload.
    pub raw_data: serde_json::Value,
}

impl NewMetric {
    /// Attaches a storage-assigned identifier, producing the persisted form.
    #[must_use]
    pub fn into_metric(self, id: MetricId) -> HealthMetric {
        HealthMetric {
            id,
            recorded_at: self.recorded_at,
            steps: self.steps,
            sleep_minutes: self.sleep_minutes,
            weight_kg: self.weight_kg,
            resting_hr: self.resting_hr,
            energy_level: self.energy_level,
            exercise_minutes: self.exercise_minutes,
            active_energy_kcal: self.active_energy_kcal,
            raw_data: self.raw_data,
        }
    }
}
