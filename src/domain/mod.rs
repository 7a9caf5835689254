//! Domain layer: canonical record types and the two pure pipelines.
//!
//! This module contains the server-side domain model: metric identity, the
//! canonical record, the ingestion normalizer that produces records from
//! loosely-typed webhook payloads, and the daily aggregator that derives
//! the dashboard view. Everything here is pure; persistence and HTTP live
//! in their own layers.

pub mod aggregate;
pub mod metric;
pub mod metric_id;
pub mod normalizer;

pub use aggregate::{DailyAggregate, Dashboard, build_dashboard};
pub use metric::{HealthMetric, NewMetric};
pub use metric_id::MetricId;
