//! Persistence boundary of the import engine.
//!
//! The engine never touches SQL directly. Everything it reads or writes
//! goes through [`InventoryStore`], which lets the same row logic run
//! against Postgres in production and an in-memory store in tests.
//!
//! Writes are batched: they become durable only on [`InventoryStore::flush`].
//! Reads issued before a flush must still observe the run's own pending
//! writes, so later rows see records created by earlier ones.

use async_trait::async_trait;

use assetdesk_core::types::DbId;
use assetdesk_db::models::audit::CreateAuditLog;
use assetdesk_db::models::directory::{
    CreatePerson, DirectoryAccount, Person, SaveDirectoryAccount,
};
use assetdesk_db::models::equipment::{Equipment, SaveEquipment};
use assetdesk_db::models::location::{Desk, FloorPlan, Location};
use assetdesk_db::models::reference::{Category, EquipmentStatus};
use assetdesk_db::models::tech_config::{SaveTechConfiguration, TechConfiguration};

use crate::error::StoreError;

pub mod postgres;

pub use postgres::PgInventoryStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage interface used by one import run.
#[async_trait]
pub trait InventoryStore: Send {
    // === Equipment ===

    /// Find equipment by tag, active or inactive.
    async fn find_equipment_by_tag(&mut self, tag: &str) -> StoreResult<Option<Equipment>>;

    async fn create_equipment(&mut self, input: &SaveEquipment) -> StoreResult<Equipment>;

    async fn update_equipment(&mut self, id: DbId, input: &SaveEquipment)
        -> StoreResult<Equipment>;

    /// Create or fully overwrite the equipment's technology configuration.
    async fn upsert_tech_config(
        &mut self,
        equipment_id: DbId,
        input: &SaveTechConfiguration,
    ) -> StoreResult<TechConfiguration>;

    async fn append_audit(&mut self, entry: &CreateAuditLog) -> StoreResult<()>;

    // === Reference lookups ===

    /// Case-insensitive exact name match.
    async fn find_category_by_name(&mut self, name: &str) -> StoreResult<Option<Category>>;

    /// Case-insensitive exact name match.
    async fn find_status_by_name(&mut self, name: &str) -> StoreResult<Option<EquipmentStatus>>;

    // === Locations ===

    async fn find_location(&mut self, id: DbId) -> StoreResult<Option<Location>>;

    /// All locations, in the order substring matching should try them.
    async fn list_locations(&mut self) -> StoreResult<Vec<Location>>;

    async fn find_floor_plan(
        &mut self,
        location_id: DbId,
        floor_number: &str,
    ) -> StoreResult<Option<FloorPlan>>;

    async fn find_desk(&mut self, floor_plan_id: DbId, desk_number: &str)
        -> StoreResult<Option<Desk>>;

    // === Directory ===

    /// Match an address against account mail or principal name.
    async fn find_directory_account_by_email(
        &mut self,
        email: &str,
    ) -> StoreResult<Option<DirectoryAccount>>;

    /// Find by object id when given, otherwise by principal name.
    async fn find_directory_account(
        &mut self,
        object_id: Option<&str>,
        user_principal_name: &str,
    ) -> StoreResult<Option<DirectoryAccount>>;

    async fn create_directory_account(
        &mut self,
        input: &SaveDirectoryAccount,
    ) -> StoreResult<DirectoryAccount>;

    async fn update_directory_account(
        &mut self,
        id: DbId,
        input: &SaveDirectoryAccount,
    ) -> StoreResult<DirectoryAccount>;

    async fn create_person(&mut self, input: &CreatePerson) -> StoreResult<Person>;

    // === Batching ===

    /// Make every write since the previous flush durable.
    ///
    /// On failure the pending writes are discarded and the store is ready
    /// for the next batch.
    async fn flush(&mut self) -> StoreResult<()>;
}
