//! Location -> floor plan -> desk containment hierarchy.

use assetdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A site or building.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Location {
    pub id: DbId,
    pub name: String,
    pub address: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A floor within a location. `floor_number` is free text ("2", "B1").
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FloorPlan {
    pub id: DbId,
    pub location_id: DbId,
    pub floor_number: String,
    pub name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A desk on a floor plan.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Desk {
    pub id: DbId,
    pub floor_plan_id: DbId,
    pub desk_number: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a location.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLocation {
    pub name: String,
    pub address: Option<String>,
}

/// DTO for creating a floor plan.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFloorPlan {
    pub location_id: DbId,
    pub floor_number: String,
    pub name: Option<String>,
}

/// DTO for creating a desk.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDesk {
    pub floor_plan_id: DbId,
    pub desk_number: String,
}
