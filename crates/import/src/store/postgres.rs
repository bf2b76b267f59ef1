//! [`InventoryStore`] backed by Postgres.
//!
//! A batch is one database transaction, begun lazily on first use and
//! committed by [`flush`](InventoryStore::flush). Lookups run inside the
//! same transaction so they see the batch's uncommitted rows. Every
//! statement runs in its own savepoint: a failed read or write is rolled
//! back on its own and leaves the rest of the batch usable.

use async_trait::async_trait;
use sqlx::{Connection, PgPool, Postgres, Transaction};

use assetdesk_core::types::DbId;
use assetdesk_db::models::audit::CreateAuditLog;
use assetdesk_db::models::directory::{
    CreatePerson, DirectoryAccount, Person, SaveDirectoryAccount,
};
use assetdesk_db::models::equipment::{Equipment, SaveEquipment};
use assetdesk_db::models::location::{Desk, FloorPlan, Location};
use assetdesk_db::models::reference::{Category, EquipmentStatus};
use assetdesk_db::models::tech_config::{SaveTechConfiguration, TechConfiguration};
use assetdesk_db::repositories::{
    AuditLogRepo, CategoryRepo, DirectoryAccountRepo, EquipmentRepo, LocationRepo, PersonRepo,
    StatusRepo, TechConfigRepo,
};

use super::{InventoryStore, StoreResult};
use crate::error::StoreError;

pub struct PgInventoryStore {
    pool: PgPool,
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgInventoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool, tx: None }
    }

    /// The open batch transaction, begun on first use.
    async fn tx(&mut self) -> StoreResult<&mut Transaction<'static, Postgres>> {
        if self.tx.is_none() {
            self.tx = Some(self.pool.begin().await?);
        }
        self.tx
            .as_mut()
            .ok_or_else(|| StoreError::Rejected("batch transaction unavailable".into()))
    }

    /// A savepoint inside the batch transaction. Reads and writes alike run
    /// in one: a failed statement rolls back to it and leaves the batch
    /// transaction usable.
    async fn savepoint(&mut self) -> StoreResult<Transaction<'_, Postgres>> {
        let tx = self.tx().await?;
        Ok(Connection::begin(&mut **tx).await?)
    }
}

#[async_trait]
impl InventoryStore for PgInventoryStore {
    async fn find_equipment_by_tag(&mut self, tag: &str) -> StoreResult<Option<Equipment>> {
        let mut sp = self.savepoint().await?;
        let found = EquipmentRepo::find_by_tag(&mut *sp, tag).await?;
        sp.commit().await?;
        Ok(found)
    }

    async fn create_equipment(&mut self, input: &SaveEquipment) -> StoreResult<Equipment> {
        let mut sp = self.savepoint().await?;
        let created = EquipmentRepo::create(&mut *sp, input).await?;
        sp.commit().await?;
        Ok(created)
    }

    async fn update_equipment(
        &mut self,
        id: DbId,
        input: &SaveEquipment,
    ) -> StoreResult<Equipment> {
        let mut sp = self.savepoint().await?;
        let updated = EquipmentRepo::update(&mut *sp, id, input)
            .await?
            .ok_or_else(|| StoreError::Rejected(format!("equipment {id} no longer exists")))?;
        sp.commit().await?;
        Ok(updated)
    }

    async fn upsert_tech_config(
        &mut self,
        equipment_id: DbId,
        input: &SaveTechConfiguration,
    ) -> StoreResult<TechConfiguration> {
        let mut sp = self.savepoint().await?;
        let config = TechConfigRepo::upsert(&mut *sp, equipment_id, input).await?;
        sp.commit().await?;
        Ok(config)
    }

    async fn append_audit(&mut self, entry: &CreateAuditLog) -> StoreResult<()> {
        let mut sp = self.savepoint().await?;
        AuditLogRepo::create(&mut *sp, entry).await?;
        sp.commit().await?;
        Ok(())
    }

    async fn find_category_by_name(&mut self, name: &str) -> StoreResult<Option<Category>> {
        let mut sp = self.savepoint().await?;
        let found = CategoryRepo::find_by_name(&mut *sp, name).await?;
        sp.commit().await?;
        Ok(found)
    }

    async fn find_status_by_name(&mut self, name: &str) -> StoreResult<Option<EquipmentStatus>> {
        let mut sp = self.savepoint().await?;
        let found = StatusRepo::find_by_name(&mut *sp, name).await?;
        sp.commit().await?;
        Ok(found)
    }

    async fn find_location(&mut self, id: DbId) -> StoreResult<Option<Location>> {
        let mut sp = self.savepoint().await?;
        let found = LocationRepo::find_by_id(&mut *sp, id).await?;
        sp.commit().await?;
        Ok(found)
    }

    async fn list_locations(&mut self) -> StoreResult<Vec<Location>> {
        let mut sp = self.savepoint().await?;
        let found = LocationRepo::list(&mut *sp).await?;
        sp.commit().await?;
        Ok(found)
    }

    async fn find_floor_plan(
        &mut self,
        location_id: DbId,
        floor_number: &str,
    ) -> StoreResult<Option<FloorPlan>> {
        let mut sp = self.savepoint().await?;
        let found = LocationRepo::find_floor_plan(&mut *sp, location_id, floor_number).await?;
        sp.commit().await?;
        Ok(found)
    }

    async fn find_desk(
        &mut self,
        floor_plan_id: DbId,
        desk_number: &str,
    ) -> StoreResult<Option<Desk>> {
        let mut sp = self.savepoint().await?;
        let found = LocationRepo::find_desk(&mut *sp, floor_plan_id, desk_number).await?;
        sp.commit().await?;
        Ok(found)
    }

    async fn find_directory_account_by_email(
        &mut self,
        email: &str,
    ) -> StoreResult<Option<DirectoryAccount>> {
        let mut sp = self.savepoint().await?;
        let found = DirectoryAccountRepo::find_by_email_or_upn(&mut *sp, email).await?;
        sp.commit().await?;
        Ok(found)
    }

    async fn find_directory_account(
        &mut self,
        object_id: Option<&str>,
        user_principal_name: &str,
    ) -> StoreResult<Option<DirectoryAccount>> {
        let mut sp = self.savepoint().await?;
        let found = DirectoryAccountRepo::find_by_key(&mut *sp, object_id, user_principal_name).await?;
        sp.commit().await?;
        Ok(found)
    }

    async fn create_directory_account(
        &mut self,
        input: &SaveDirectoryAccount,
    ) -> StoreResult<DirectoryAccount> {
        let mut sp = self.savepoint().await?;
        let created = DirectoryAccountRepo::create(&mut *sp, input).await?;
        sp.commit().await?;
        Ok(created)
    }

    async fn update_directory_account(
        &mut self,
        id: DbId,
        input: &SaveDirectoryAccount,
    ) -> StoreResult<DirectoryAccount> {
        let mut sp = self.savepoint().await?;
        let updated = DirectoryAccountRepo::update(&mut *sp, id, input)
            .await?
            .ok_or_else(|| {
                StoreError::Rejected(format!("directory account {id} no longer exists"))
            })?;
        sp.commit().await?;
        Ok(updated)
    }

    async fn create_person(&mut self, input: &CreatePerson) -> StoreResult<Person> {
        let mut sp = self.savepoint().await?;
        let person = PersonRepo::create(&mut *sp, input).await?;
        sp.commit().await?;
        Ok(person)
    }

    async fn flush(&mut self) -> StoreResult<()> {
        // Dropping a transaction whose commit failed rolls it back.
        let Some(mut tx) = self.tx.take() else {
            return Ok(());
        };
        // COMMIT on an aborted transaction reports a rollback, not an error.
        sqlx::query("SELECT 1").execute(&mut *tx).await?;
        Ok(tx.commit().await?)
    }
}
