//! Repository for `technology_configurations`.

use assetdesk_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::tech_config::{SaveTechConfiguration, TechConfiguration};

const COLUMNS: &str = "id, equipment_id, hostname, ipv4_address, mac_address, switch_port, \
    wall_port, phone_number, extension, imei, sim_number, created_at, updated_at";

/// One-to-one configuration rows keyed by equipment.
pub struct TechConfigRepo;

impl TechConfigRepo {
    /// Create the equipment's configuration, or overwrite every field of the
    /// existing one.
    pub async fn upsert<'e, E>(
        db: E,
        equipment_id: DbId,
        input: &SaveTechConfiguration,
    ) -> Result<TechConfiguration, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO technology_configurations
                (equipment_id, hostname, ipv4_address, mac_address, switch_port,
                 wall_port, phone_number, extension, imei, sim_number)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             ON CONFLICT (equipment_id) DO UPDATE SET
                hostname = EXCLUDED.hostname,
                ipv4_address = EXCLUDED.ipv4_address,
                mac_address = EXCLUDED.mac_address,
                switch_port = EXCLUDED.switch_port,
                wall_port = EXCLUDED.wall_port,
                phone_number = EXCLUDED.phone_number,
                extension = EXCLUDED.extension,
                imei = EXCLUDED.imei,
                sim_number = EXCLUDED.sim_number,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TechConfiguration>(&query)
            .bind(equipment_id)
            .bind(&input.hostname)
            .bind(&input.ipv4_address)
            .bind(&input.mac_address)
            .bind(&input.switch_port)
            .bind(&input.wall_port)
            .bind(&input.phone_number)
            .bind(&input.extension)
            .bind(&input.imei)
            .bind(&input.sim_number)
            .fetch_one(db)
            .await
    }
}
