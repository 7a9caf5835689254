//! Dashboard endpoint DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::aggregate::{DailyAggregate, Dashboard};
use crate::domain::metric::HealthMetric;

/// One canonical record as exposed to the frontend.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MetricDto {
    /// Record identifier.
    pub id: uuid::Uuid,
    /// Recording timestamp (RFC 3339, UTC).
    pub recorded_at: DateTime<Utc>,
    /// Step count.
    pub steps: Option<i32>,
    /// Minutes asleep.
    pub sleep_minutes: Option<i32>,
    /// Body weight in kilograms.
    pub weight_kg: Option<f64>,
    /// Resting heart rate in bpm.
    pub resting_hr: Option<i32>,
    /// Subjective energy level (0–10).
    pub energy_level: Option<i32>,
    /// Minutes of exercise.
    pub exercise_minutes: Option<i32>,
    /// Active energy in kilocalories.
    pub active_energy_kcal: Option<i32>,
    /// Verbatim original webhook payload.
    pub raw_data: serde_json::Value,
}

impl From<HealthMetric> for MetricDto {
    fn from(m: HealthMetric) -> Self {
        Self {
            id: m.id.into(),
            recorded_at: m.recorded_at,
            steps: m.steps,
            sleep_minutes: m.sleep_minutes,
            weight_kg: m.weight_kg,
            resting_hr: m.resting_hr,
            energy_level: m.energy_level,
            exercise_minutes: m.exercise_minutes,
            active_energy_kcal: m.active_energy_kcal,
            raw_data: m.raw_data,
        }
    }
}

/// One day's aggregate in the trailing window, camelCased for the charts.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyAggregateDto {
    /// Local day key, `YYYY-MM-DD`.
    pub date: String,
    /// Sum of step counts for the day.
    pub steps: i64,
    /// Total sleep in hours, one decimal.
    pub sleep_hours: f64,
    /// Most recent energy reading for the day, if any.
    pub energy_level: Option<i32>,
}

impl From<DailyAggregate> for DailyAggregateDto {
    fn from(d: DailyAggregate) -> Self {
        Self {
            date: d.date.format("%Y-%m-%d").to_string(),
            steps: d.steps,
            sleep_hours: d.sleep_hours,
            energy_level: d.energy_level,
        }
    }
}

/// Response body for `GET /dashboard` (200 OK).
///
/// `today`/`yesterday` serialize as `null` when absent; the frontend
/// treats both as "no data yet", never as an error.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// Window records, most recent first.
    pub recent: Vec<MetricDto>,
    /// Most recent record of the current local day.
    pub today: Option<MetricDto>,
    /// Most recent record of the previous local day.
    pub yesterday: Option<MetricDto>,
    /// Per-day aggregates, oldest first.
    pub by_day: Vec<DailyAggregateDto>,
}

impl From<Dashboard> for DashboardResponse {
    fn from(d: Dashboard) -> Self {
        Self {
            recent: d.recent.into_iter().map(MetricDto::from).collect(),
            today: d.today.map(MetricDto::from),
            yesterday: d.yesterday.map(MetricDto::from),
            by_day: d.by_day.into_iter().map(DailyAggregateDto::from).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn by_day_serializes_with_camel_case_keys() {
        let dto = DailyAggregateDto {
            date: "2026-08-30".to_string(),
            steps: 1200,
            sleep_hours: 7.5,
            energy_level: None,
        };
        let Ok(json) = serde_json::to_value(&dto) else {
            panic!("serialization failed");
        };
        assert_eq!(json.get("sleepHours"), Some(&serde_json::json!(7.5)));
        assert_eq!(json.get("energyLevel"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn absent_today_serializes_as_null() {
        let response = DashboardResponse::from(Dashboard::empty());
        let Ok(json) = serde_json::to_value(&response) else {
            panic!("serialization failed");
        };
        assert_eq!(json.get("today"), Some(&serde_json::Value::Null));
        assert_eq!(json.get("byDay"), Some(&serde_json::json!([])));
    }
}
