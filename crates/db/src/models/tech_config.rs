//! One-to-one network and telephony configuration for an equipment record.

use assetdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `technology_configurations`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TechConfiguration {
    pub id: DbId,
    pub equipment_id: DbId,
    pub hostname: Option<String>,
    pub ipv4_address: Option<String>,
    pub mac_address: Option<String>,
    pub switch_port: Option<String>,
    pub wall_port: Option<String>,
    pub phone_number: Option<String>,
    pub extension: Option<String>,
    pub imei: Option<String>,
    pub sim_number: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Full replacement of a configuration's fields. `None` clears a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SaveTechConfiguration {
    pub hostname: Option<String>,
    pub ipv4_address: Option<String>,
    pub mac_address: Option<String>,
    pub switch_port: Option<String>,
    pub wall_port: Option<String>,
    pub phone_number: Option<String>,
    pub extension: Option<String>,
    pub imei: Option<String>,
    pub sim_number: Option<String>,
}
