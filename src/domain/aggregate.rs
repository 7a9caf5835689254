//! Daily aggregator: derives the dashboard view from a window of canonical
//! records.
//!
//! All derivation happens in one pass over records pre-sorted descending by
//! `recorded_at` (the persistence query's ordering): `today`/`yesterday`
//! selection and per-day `energy_level` are first-match-wins against that
//! ordering, so no second sort or grouping pass is needed. Day buckets are
//! pre-populated for every day of the trailing window before any record is
//! inspected, which guarantees the chart always gets a full window even
//! when the store is sparse.
//!
//! Aggregates are recomputed on every read and never persisted.

use std::collections::BTreeMap;

use chrono::{DateTime, Days, NaiveDate, TimeZone};

use super::metric::HealthMetric;

/// Number of trailing calendar days in the default dashboard window.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// One derived aggregate per calendar day of the trailing window.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAggregate {
    /// Local calendar day this aggregate covers.
    pub date: NaiveDate,
    /// Sum of step counts across the day's records (absent readings count
    /// as zero).
    pub steps: i64,
    /// Total sleep for the day in hours, rounded to one decimal.
    pub sleep_hours: f64,
    /// First non-absent energy level among the day's records in descending
    /// recency order, i.e. the most recent reading wins.
    pub energy_level: Option<i32>,
}

/// The full derived dashboard view.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    /// Window records, most recent first (persistence ordering preserved).
    pub recent: Vec<HealthMetric>,
    /// Most recent record whose local day is today, if any.
    pub today: Option<HealthMetric>,
    /// Most recent record whose local day is yesterday, if any.
    pub yesterday: Option<HealthMetric>,
    /// Per-day aggregates, oldest day first. Always one entry per window
    /// day, including days with no records.
    pub by_day: Vec<DailyAggregate>,
}

impl Dashboard {
    /// The degraded-but-well-formed view served when the store read fails.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Accumulator for one day bucket.
#[derive(Debug, Default)]
struct DayBucket {
    steps: i64,
    sleep_minutes: i64,
    energy_level: Option<i32>,
}

/// Builds the dashboard view from window records sorted descending by
/// `recorded_at`.
///
/// `now` fixes both the observer's timezone (used to derive local day keys)
/// and the window's last day. Records whose local day falls outside the
/// window (possible at the query's lower time bound when the observer's
/// offset shifts the day key) are skipped, not errors.
pub fn build_dashboard<Tz: TimeZone>(
    records: Vec<HealthMetric>,
    now: &DateTime<Tz>,
    window_days: u32,
) -> Dashboard {
    let tz = now.timezone();
    let today = now.date_naive();
    let yesterday = today.pred_opt();

    // Pre-populate a bucket for every window day so sparse data still
    // yields exactly `window_days` entries. BTreeMap keys keep the output
    // chronologically ascending.
    let mut buckets: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
    for offset in 0..window_days {
        if let Some(day) = today.checked_sub_days(Days::new(u64::from(offset))) {
            buckets.insert(day, DayBucket::default());
        }
    }

    let mut today_record: Option<HealthMetric> = None;
    let mut yesterday_record: Option<HealthMetric> = None;

    for record in &records {
        let day = record.recorded_at.with_timezone(&tz).date_naive();

        if day == today && today_record.is_none() {
            today_record = Some(record.clone());
        }
        if Some(day) == yesterday && yesterday_record.is_none() {
            yesterday_record = Some(record.clone());
        }

        if let Some(bucket) = buckets.get_mut(&day) {
            bucket.steps += i64::from(record.steps.unwrap_or(0));
            bucket.sleep_minutes += i64::from(record.sleep_minutes.unwrap_or(0));
            if bucket.energy_level.is_none() {
                bucket.energy_level = record.energy_level;
            }
        }
    }

    let by_day = buckets
        .into_iter()
        .map(|(date, bucket)| DailyAggregate {
            date,
            steps: bucket.steps,
            sleep_hours: round_one_decimal(minutes_to_hours(bucket.sleep_minutes)),
            energy_level: bucket.energy_level,
        })
        .collect();

    Dashboard {
        recent: records,
        today: today_record,
        yesterday: yesterday_record,
        by_day,
    }
}

#[allow(clippy::cast_precision_loss)]
fn minutes_to_hours(minutes: i64) -> f64 {
    minutes as f64 / 60.0
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
