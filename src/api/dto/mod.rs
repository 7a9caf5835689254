//! Data Transfer Objects for REST request/response serialization.
//!
//! Dashboard aggregate fields use camelCase (`byDay`, `sleepHours`,
//! `energyLevel`) to match what the charting frontend consumes.

pub mod dashboard_dto;
pub mod ingest_dto;

pub use dashboard_dto::*;
pub use ingest_dto::*;
