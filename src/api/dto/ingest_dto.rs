//! Ingestion endpoint DTOs.

use serde::Serialize;
use utoipa::ToSchema;

/// Response body for `POST /hooks/ingest` (200 OK).
#[derive(Debug, Serialize, ToSchema)]
pub struct IngestResponse {
    /// Always `true` on the success path.
    pub success: bool,
    /// Storage-assigned identifier of the inserted record.
    pub id: uuid::Uuid,
}
