//! Equipment classification lookups.

use assetdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `equipment_categories`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// A row from `equipment_statuses`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EquipmentStatus {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}
