//! Equipment audit trail. Entries are immutable once created (no updated_at).

use assetdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single audit log entry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLog {
    pub id: DbId,
    pub equipment_id: DbId,
    pub action: String,
    pub actor: String,
    pub description: String,
    pub created_at: Timestamp,
}

/// DTO for appending an audit log entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateAuditLog {
    pub equipment_id: DbId,
    pub action: String,
    pub actor: String,
    pub description: String,
}
