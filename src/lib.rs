//! # vitals-gateway
//!
//! REST webhook gateway for personal health metrics.
//!
//! This crate ingests metric readings pushed from a phone automation,
//! persists them in PostgreSQL, and serves an aggregated daily dashboard
//! view to a presentation frontend. All decision logic lives in two pure
//! pipelines, the ingestion normalizer and the daily aggregator, with
//! HTTP and storage as thin layers around them.
//!
//! ## Architecture
//!
//! ```text
//! Phone automation (webhook POST)        Dashboard frontend (GET)
//!     │                                      │
//!     ├── REST Handlers (api/)              ─┤
//!     │                                      │
//!     ├── MetricService (service/)          ─┤
//!     │                                      │
//!     ├── Normalizer (domain/)    Aggregator (domain/)
//!     │                                      │
//!     └── PostgreSQL Persistence ────────────┘
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
