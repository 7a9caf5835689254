//! Metric service: orchestrates ingestion and dashboard reads.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::domain::aggregate::{Dashboard, build_dashboard};
use crate::domain::normalizer::normalize;
use crate::domain::MetricId;
use crate::error::GatewayError;
use crate::persistence::MetricStore;

/// Orchestration layer for metric ingestion and dashboard aggregation.
///
/// Stateless coordinator: holds a handle to the [`MetricStore`] and the
/// configured window size. The write path validates before it touches the
/// store; the read path never fails, storage errors degrade to an empty
/// dashboard so the presentation layer always has something to render.
#[derive(Debug, Clone)]
pub struct MetricService {
    store: Arc<dyn MetricStore>,
    window_days: u32,
}

impl MetricService {
    /// Creates a new `MetricService`.
    #[must_use]
    pub fn new(store: Arc<dyn MetricStore>, window_days: u32) -> Self {
        Self { store, window_days }
    }

    /// Normalizes an inbound webhook payload and inserts the canonical
    /// record, returning its storage-assigned ID.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidDate`] if the payload carries an
    /// unparseable `date` (in that case the store is never invoked), or
    /// [`GatewayError::PersistenceError`] with the underlying message if
    /// the insert fails. Storage failures are not retried here; the
    /// webhook caller retries at the transport level if it cares to.
    pub async fn ingest(
        &self,
        payload: serde_json::Value,
        now: DateTime<Utc>,
    ) -> Result<MetricId, GatewayError> {
        let record = normalize(&payload, now)?;
        let id = self.store.insert(&record).await?;
        tracing::info!(%id, recorded_at = %record.recorded_at, "metric ingested");
        Ok(id)
    }

    /// Reads the trailing window and derives the dashboard view.
    ///
    /// `now` carries the observer's timezone; day keys and the window's
    /// last day are computed in it. Production passes `Local::now()`.
    ///
    /// Never fails: if the store read errors, the failure is logged and an
    /// empty-but-well-formed [`Dashboard`] is returned.
    pub async fn dashboard<Tz>(&self, now: &DateTime<Tz>) -> Dashboard
    where
        Tz: TimeZone + Send + Sync,
        Tz::Offset: Send + Sync,
    {
        let since = now.with_timezone(&Utc) - Duration::days(i64::from(self.window_days));

        match self.store.recorded_since(since).await {
            Ok(records) => build_dashboard(records, now, self.window_days),
            Err(e) => {
                tracing::error!(error = %e, "dashboard read failed; serving empty view");
                Dashboard::empty()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::domain::{HealthMetric, NewMetric};

    /// In-memory store fake recording every insert.
    #[derive(Debug, Default)]
    struct MemoryStore {
        records: Mutex<Vec<NewMetric>>,
    }

    #[async_trait]
    impl MetricStore for MemoryStore {
        async fn insert(&self, record: &NewMetric) -> Result<MetricId, GatewayError> {
            let Ok(mut records) = self.records.lock() else {
                panic!("store mutex poisoned");
            };
            records.push(record.clone());
            Ok(MetricId::new())
        }

        async fn recorded_since(
            &self,
            since: DateTime<Utc>,
        ) -> Result<Vec<HealthMetric>, GatewayError> {
            let Ok(records) = self.records.lock() else {
                panic!("store mutex poisoned");
            };
            let mut out: Vec<HealthMetric> = records
                .iter()
                .filter(|r| r.recorded_at >= since)
                .map(|r| r.clone().into_metric(MetricId::new()))
                .collect();
            out.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
            Ok(out)
        }
    }

    /// Store fake whose every operation fails.
    #[derive(Debug)]
    struct FailingStore;

    #[async_trait]
    impl MetricStore for FailingStore {
        async fn insert(&self, _record: &NewMetric) -> Result<MetricId, GatewayError> {
            Err(GatewayError::PersistenceError("insert refused".to_string()))
        }

        async fn recorded_since(
            &self,
            _since: DateTime<Utc>,
        ) -> Result<Vec<HealthMetric>, GatewayError> {
            Err(GatewayError::PersistenceError("read refused".to_string()))
        }
    }

    fn now() -> DateTime<Utc> {
        let Some(ts) = DateTime::from_timestamp(1_790_000_000, 0) else {
            panic!("valid timestamp");
        };
        ts
    }

    #[tokio::test]
    async fn ingest_normalizes_then_inserts() {
        let store = Arc::new(MemoryStore::default());
        let service = MetricService::new(Arc::clone(&store) as Arc<dyn MetricStore>, 7);

        let payload = json!({ "steps": 10234.6, "weight": 72.4 });
        let result = service.ingest(payload.clone(), now()).await;
        assert!(result.is_ok());

        let Ok(records) = store.records.lock() else {
            panic!("store mutex poisoned");
        };
        assert_eq!(records.len(), 1);
        let Some(stored) = records.first() else {
            panic!("record missing");
        };
        assert_eq!(stored.steps, Some(10235));
        assert_eq!(stored.weight_kg, Some(72.4));
        assert_eq!(stored.raw_data, payload);
    }

    #[tokio::test]
    async fn invalid_date_never_reaches_the_store() {
        let store = Arc::new(MemoryStore::default());
        let service = MetricService::new(Arc::clone(&store) as Arc<dyn MetricStore>, 7);

        let result = service.ingest(json!({ "date": "not-a-date" }), now()).await;
        assert!(matches!(result, Err(GatewayError::InvalidDate(_))));

        let Ok(records) = store.records.lock() else {
            panic!("store mutex poisoned");
        };
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn insert_failure_surfaces_the_storage_message() {
        let service = MetricService::new(Arc::new(FailingStore), 7);

        let result = service.ingest(json!({ "steps": 100 }), now()).await;
        let Err(GatewayError::PersistenceError(msg)) = result else {
            panic!("expected PersistenceError");
        };
        assert_eq!(msg, "insert refused");
    }

    #[tokio::test]
    async fn dashboard_reads_window_and_aggregates() {
        let store = Arc::new(MemoryStore::default());
        let service = MetricService::new(Arc::clone(&store) as Arc<dyn MetricStore>, 7);

        let ingested = service
            .ingest(json!({ "steps": 3000, "energy": 8 }), now())
            .await;
        assert!(ingested.is_ok());

        let dashboard = service.dashboard(&now()).await;
        assert_eq!(dashboard.recent.len(), 1);
        assert_eq!(dashboard.by_day.len(), 7);
        let Some(today) = dashboard.by_day.last() else {
            panic!("by_day is never empty");
        };
        assert_eq!(today.steps, 3000);
        assert_eq!(today.energy_level, Some(8));
        assert!(dashboard.today.is_some());
    }

    #[tokio::test]
    async fn dashboard_absorbs_read_failures_into_empty_view() {
        let service = MetricService::new(Arc::new(FailingStore), 7);

        let dashboard = service.dashboard(&now()).await;
        assert!(dashboard.recent.is_empty());
        assert!(dashboard.today.is_none());
        assert!(dashboard.yesterday.is_none());
        assert!(dashboard.by_day.is_empty());
    }
}
