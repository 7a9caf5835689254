//! Ingestion normalizer: validates and coerces an inbound webhook payload
//! into a canonical [`NewMetric`] ready for storage.
//!
//! The webhook source (a phone automation) is loosely typed: every field is
//! optional, counts may arrive as fractional floats from upstream sensors,
//! and numbers occasionally arrive as strings. The normalizer owns all of
//! that coercion so the rest of the system only ever sees canonical records.
//!
//! Normalization has no side effects; persistence is the caller's concern.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use super::metric::NewMetric;
use crate::error::GatewayError;

/// Validates and normalizes an inbound payload into a [`NewMetric`].
///
/// - The payload's `date` field, when present, must parse as a timestamp;
///   otherwise `now` is used as the recording time.
/// - Count-like fields (`steps`, `sleep_minutes`, `heart_rate`, `energy`,
///   `exercise_time`, `active_energy`) are rounded to the nearest integer.
/// - `weight` is a real-valued measurement and passes through unrounded.
/// - Absent fields stay absent; they are never defaulted to zero.
/// - The full original payload is retained verbatim in `raw_data`.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidDate`] if the `date` field is present but
/// not parseable as a timestamp. No other input is rejected.
pub fn normalize(payload: &Value, now: DateTime<Utc>) -> Result<NewMetric, GatewayError> {
    let recorded_at = match payload.get("date") {
        None | Some(Value::Null) => now,
        Some(value) => parse_timestamp(value)?,
    };

    Ok(NewMetric {
        recorded_at,
        steps: rounded_int(payload, "steps"),
        sleep_minutes: rounded_int(payload, "sleep_minutes"),
        weight_kg: numeric(payload, "weight"),
        resting_hr: rounded_int(payload, "heart_rate"),
        energy_level: rounded_int(payload, "energy"),
        exercise_minutes: rounded_int(payload, "exercise_time"),
        active_energy_kcal: rounded_int(payload, "active_energy"),
        raw_data: payload.clone(),
    })
}

/// Parses the `date` field into a UTC timestamp.
///
/// Accepted forms, tried in order:
/// - RFC 3339 (`2026-08-30T07:41:00Z`, with or without offset)
/// - `YYYY-MM-DDTHH:MM:SS` / `YYYY-MM-DD HH:MM:SS` (assumed UTC)
/// - `YYYY-MM-DD` (midnight UTC)
fn parse_timestamp(value: &Value) -> Result<DateTime<Utc>, GatewayError> {
    let Some(s) = value.as_str() else {
        return Err(GatewayError::InvalidDate(value.to_string()));
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(midnight) = day.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(GatewayError::InvalidDate(s.to_string()))
}

/// Extracts `field` as a number, accepting both JSON numbers and numeric
/// strings (the phone automation is not consistent about which it sends).
fn numeric(payload: &Value, field: &str) -> Option<f64> {
    payload.get(field).and_then(|v| {
        v.as_f64()
            .or_else(|| v.as_str().and_then(|s| s.parse().ok()))
    })
}

/// Extracts `field` as a number and rounds to the nearest integer.
///
/// Rounding is mandatory for count-like fields: upstream sensors report
/// fractional values (e.g. `steps: 10234.6`) and truncation would bias
/// every reading downward.
#[allow(clippy::cast_possible_truncation)]
fn rounded_int(payload: &Value, field: &str) -> Option<i32> {
    numeric(payload, field).map(|v| v.round() as i32)
}
