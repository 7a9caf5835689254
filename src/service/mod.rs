//! Service layer: business logic orchestration.
//!
//! [`MetricService`] coordinates the write path (normalize, then insert)
//! and the read path (query the window, then aggregate), delegating the
//! actual decision logic to the pure functions in [`crate::domain`].

pub mod metric_service;

pub use metric_service::MetricService;
