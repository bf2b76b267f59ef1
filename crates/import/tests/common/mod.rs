//! In-memory [`InventoryStore`] and worksheet builders for engine tests.
//!
//! Writes go to a working copy that lookups read from; `flush` either
//! promotes the working copy to the committed snapshot or, when told to
//! fail, throws it away.

#![allow(dead_code)]

use std::collections::HashSet;

use assetdesk_core::fields::{Field, PositionalLayout};
use assetdesk_core::sheet::Worksheet;
use assetdesk_core::types::DbId;
use assetdesk_db::models::audit::{AuditLog, CreateAuditLog};
use assetdesk_db::models::directory::{
    CreatePerson, DirectoryAccount, Person, SaveDirectoryAccount,
};
use assetdesk_db::models::equipment::{Equipment, SaveEquipment};
use assetdesk_db::models::location::{Desk, FloorPlan, Location};
use assetdesk_db::models::reference::{Category, EquipmentStatus};
use assetdesk_db::models::tech_config::{SaveTechConfiguration, TechConfiguration};
use assetdesk_import::store::{InventoryStore, StoreResult};
use assetdesk_import::StoreError;
use async_trait::async_trait;
use chrono::Utc;

#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub equipment: Vec<Equipment>,
    pub tech_configs: Vec<TechConfiguration>,
    pub audit_logs: Vec<AuditLog>,
    pub accounts: Vec<DirectoryAccount>,
    pub people: Vec<Person>,
    pub categories: Vec<Category>,
    pub statuses: Vec<EquipmentStatus>,
    pub locations: Vec<Location>,
    pub floor_plans: Vec<FloorPlan>,
    pub desks: Vec<Desk>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    committed: Tables,
    working: Tables,
    next_id: DbId,
    flushes: usize,
    failing_flushes: HashSet<usize>,
    failing_tags: HashSet<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed (durable) state.
    pub fn committed(&self) -> &Tables {
        &self.committed
    }

    /// Number of `flush` calls so far, failed ones included.
    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    /// Make the `n`th flush (1-based) fail.
    pub fn fail_flush(&mut self, n: usize) {
        self.failing_flushes.insert(n);
    }

    /// Make equipment writes for `tag` fail.
    pub fn fail_writes_for(&mut self, tag: &str) {
        self.failing_tags.insert(tag.to_string());
    }

    fn id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    /// Apply a seed change to both the committed and the working copy.
    fn seed<T>(&mut self, f: impl Fn(&mut Tables) -> T) -> T {
        f(&mut self.committed);
        f(&mut self.working)
    }

    // -- seeding -------------------------------------------------------------

    pub fn add_category(&mut self, name: &str) -> DbId {
        let row = Category {
            id: self.id(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.seed(|t| t.categories.push(row.clone()));
        row.id
    }

    pub fn add_status(&mut self, name: &str) -> DbId {
        let row = EquipmentStatus {
            id: self.id(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.seed(|t| t.statuses.push(row.clone()));
        row.id
    }

    pub fn add_location_with_id(&mut self, id: DbId, name: &str) -> DbId {
        let row = Location {
            id,
            name: name.to_string(),
            address: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.next_id = self.next_id.max(id);
        self.seed(|t| t.locations.push(row.clone()));
        id
    }

    pub fn add_location(&mut self, name: &str) -> DbId {
        let id = self.id();
        self.add_location_with_id(id, name)
    }

    pub fn add_floor_plan(&mut self, location_id: DbId, floor_number: &str) -> DbId {
        let row = FloorPlan {
            id: self.id(),
            location_id,
            floor_number: floor_number.to_string(),
            name: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.seed(|t| t.floor_plans.push(row.clone()));
        row.id
    }

    pub fn add_desk(&mut self, floor_plan_id: DbId, desk_number: &str) -> DbId {
        let row = Desk {
            id: self.id(),
            floor_plan_id,
            desk_number: desk_number.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.seed(|t| t.desks.push(row.clone()));
        row.id
    }

    pub fn add_account(&mut self, upn: &str, display_name: &str, mail: Option<&str>) -> DbId {
        let row = DirectoryAccount {
            id: self.id(),
            object_id: None,
            user_principal_name: upn.to_string(),
            display_name: display_name.to_string(),
            mail: mail.map(str::to_string),
            job_title: None,
            department: None,
            office_location: None,
            mobile_phone: None,
            account_enabled: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.seed(|t| t.accounts.push(row.clone()));
        row.id
    }

    pub fn add_equipment(&mut self, input: &SaveEquipment) -> DbId {
        let row = equipment_row(self.id(), input);
        self.seed(|t| t.equipment.push(row.clone()));
        row.id
    }

    // -- committed-state queries --------------------------------------------

    pub fn equipment(&self, tag: &str) -> Option<&Equipment> {
        self.committed.equipment.iter().find(|e| e.tag == tag)
    }

    pub fn tech_config(&self, equipment_id: DbId) -> Option<&TechConfiguration> {
        self.committed
            .tech_configs
            .iter()
            .find(|c| c.equipment_id == equipment_id)
    }

    pub fn audit_actions(&self, equipment_id: DbId) -> Vec<&str> {
        self.committed
            .audit_logs
            .iter()
            .filter(|a| a.equipment_id == equipment_id)
            .map(|a| a.action.as_str())
            .collect()
    }
}

fn equipment_row(id: DbId, input: &SaveEquipment) -> Equipment {
    Equipment {
        id,
        tag: input.tag.clone(),
        serial_number: input.serial_number.clone(),
        manufacturer: input.manufacturer.clone(),
        model: input.model.clone(),
        category_id: input.category_id,
        status_id: input.status_id,
        location_id: input.location_id,
        floor_plan_id: input.floor_plan_id,
        desk_id: input.desk_id,
        assigned_name: input.assigned_name.clone(),
        assigned_email: input.assigned_email.clone(),
        directory_account_id: input.directory_account_id,
        unit: input.unit.clone(),
        notes: input.notes.clone(),
        purchase_date: input.purchase_date,
        purchase_cost: input.purchase_cost,
        warranty_expiry: input.warranty_expiry,
        is_active: input.is_active,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn account_row(id: DbId, input: &SaveDirectoryAccount) -> DirectoryAccount {
    DirectoryAccount {
        id,
        object_id: input.object_id.clone(),
        user_principal_name: input.user_principal_name.clone(),
        display_name: input.display_name.clone(),
        mail: input.mail.clone(),
        job_title: input.job_title.clone(),
        department: input.department.clone(),
        office_location: input.office_location.clone(),
        mobile_phone: input.mobile_phone.clone(),
        account_enabled: input.account_enabled,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn find_equipment_by_tag(&mut self, tag: &str) -> StoreResult<Option<Equipment>> {
        Ok(self.working.equipment.iter().find(|e| e.tag == tag).cloned())
    }

    async fn create_equipment(&mut self, input: &SaveEquipment) -> StoreResult<Equipment> {
        if self.failing_tags.contains(&input.tag) {
            return Err(StoreError::Rejected("simulated write failure".into()));
        }
        if self.working.equipment.iter().any(|e| e.tag == input.tag) {
            return Err(StoreError::Rejected(format!("tag '{}' already exists", input.tag)));
        }
        let row = equipment_row(self.id(), input);
        self.working.equipment.push(row.clone());
        Ok(row)
    }

    async fn update_equipment(
        &mut self,
        id: DbId,
        input: &SaveEquipment,
    ) -> StoreResult<Equipment> {
        if self.failing_tags.contains(&input.tag) {
            return Err(StoreError::Rejected("simulated write failure".into()));
        }
        let slot = self
            .working
            .equipment
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StoreError::Rejected(format!("equipment {id} no longer exists")))?;
        let created_at = slot.created_at;
        *slot = equipment_row(id, input);
        slot.created_at = created_at;
        Ok(slot.clone())
    }

    async fn upsert_tech_config(
        &mut self,
        equipment_id: DbId,
        input: &SaveTechConfiguration,
    ) -> StoreResult<TechConfiguration> {
        let existing_id = self
            .working
            .tech_configs
            .iter()
            .find(|c| c.equipment_id == equipment_id)
            .map(|c| c.id);
        let id = match existing_id {
            Some(id) => id,
            None => self.id(),
        };
        let row = TechConfiguration {
            id,
            equipment_id,
            hostname: input.hostname.clone(),
            ipv4_address: input.ipv4_address.clone(),
            mac_address: input.mac_address.clone(),
            switch_port: input.switch_port.clone(),
            wall_port: input.wall_port.clone(),
            phone_number: input.phone_number.clone(),
            extension: input.extension.clone(),
            imei: input.imei.clone(),
            sim_number: input.sim_number.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.working
            .tech_configs
            .retain(|c| c.equipment_id != equipment_id);
        self.working.tech_configs.push(row.clone());
        Ok(row)
    }

    async fn append_audit(&mut self, entry: &CreateAuditLog) -> StoreResult<()> {
        let row = AuditLog {
            id: self.id(),
            equipment_id: entry.equipment_id,
            action: entry.action.clone(),
            actor: entry.actor.clone(),
            description: entry.description.clone(),
            created_at: Utc::now(),
        };
        self.working.audit_logs.push(row);
        Ok(())
    }

    async fn find_category_by_name(&mut self, name: &str) -> StoreResult<Option<Category>> {
        Ok(self
            .working
            .categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn find_status_by_name(&mut self, name: &str) -> StoreResult<Option<EquipmentStatus>> {
        Ok(self
            .working
            .statuses
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn find_location(&mut self, id: DbId) -> StoreResult<Option<Location>> {
        Ok(self.working.locations.iter().find(|l| l.id == id).cloned())
    }

    async fn list_locations(&mut self) -> StoreResult<Vec<Location>> {
        let mut locations = self.working.locations.clone();
        locations.sort_by_key(|l| l.id);
        Ok(locations)
    }

    async fn find_floor_plan(
        &mut self,
        location_id: DbId,
        floor_number: &str,
    ) -> StoreResult<Option<FloorPlan>> {
        Ok(self
            .working
            .floor_plans
            .iter()
            .find(|f| f.location_id == location_id && f.floor_number == floor_number)
            .cloned())
    }

    async fn find_desk(
        &mut self,
        floor_plan_id: DbId,
        desk_number: &str,
    ) -> StoreResult<Option<Desk>> {
        Ok(self
            .working
            .desks
            .iter()
            .find(|d| d.floor_plan_id == floor_plan_id && d.desk_number == desk_number)
            .cloned())
    }

    async fn find_directory_account_by_email(
        &mut self,
        email: &str,
    ) -> StoreResult<Option<DirectoryAccount>> {
        let by_mail = self.working.accounts.iter().find(|a| {
            a.mail
                .as_deref()
                .is_some_and(|m| m.eq_ignore_ascii_case(email))
        });
        let by_upn = || {
            self.working
                .accounts
                .iter()
                .find(|a| a.user_principal_name.eq_ignore_ascii_case(email))
        };
        Ok(by_mail.or_else(by_upn).cloned())
    }

    async fn find_directory_account(
        &mut self,
        object_id: Option<&str>,
        user_principal_name: &str,
    ) -> StoreResult<Option<DirectoryAccount>> {
        let found = match object_id {
            Some(oid) => self
                .working
                .accounts
                .iter()
                .find(|a| a.object_id.as_deref() == Some(oid)),
            None => self
                .working
                .accounts
                .iter()
                .find(|a| a.user_principal_name.eq_ignore_ascii_case(user_principal_name)),
        };
        Ok(found.cloned())
    }

    async fn create_directory_account(
        &mut self,
        input: &SaveDirectoryAccount,
    ) -> StoreResult<DirectoryAccount> {
        let row = account_row(self.id(), input);
        self.working.accounts.push(row.clone());
        Ok(row)
    }

    async fn update_directory_account(
        &mut self,
        id: DbId,
        input: &SaveDirectoryAccount,
    ) -> StoreResult<DirectoryAccount> {
        let slot = self
            .working
            .accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::Rejected(format!("directory account {id} no longer exists")))?;
        *slot = account_row(id, input);
        Ok(slot.clone())
    }

    async fn create_person(&mut self, input: &CreatePerson) -> StoreResult<Person> {
        let row = Person {
            id: self.id(),
            name: input.name.clone(),
            email: input.email.clone(),
            directory_account_id: input.directory_account_id,
            is_supervisor: input.is_supervisor.unwrap_or(false),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.working.people.push(row.clone());
        Ok(row)
    }

    async fn flush(&mut self) -> StoreResult<()> {
        self.flushes += 1;
        if self.failing_flushes.contains(&self.flushes) {
            self.working = self.committed.clone();
            return Err(StoreError::Rejected("simulated commit failure".into()));
        }
        self.committed = self.working.clone();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Worksheet builders
// ---------------------------------------------------------------------------

/// Worksheet from literal rows; the first row is the header.
pub fn sheet(rows: &[&[&str]]) -> Worksheet {
    let grid = rows
        .iter()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect();
    Worksheet::from_grid(grid).expect("test grid has a header row")
}

/// One positional row with only the given fields filled in.
pub fn positional_row(layout: &PositionalLayout, values: &[(Field, &str)]) -> Vec<String> {
    let width = layout.columns.iter().map(|(_, i)| i + 1).max().unwrap_or(0);
    let mut cells = vec![String::new(); width];
    for (field, value) in values {
        let index = layout
            .column(*field)
            .expect("field belongs to this layout");
        cells[index] = value.to_string();
    }
    cells
}

/// Positional worksheet: a generic header row plus `rows`.
pub fn positional_sheet(layout: &PositionalLayout, rows: Vec<Vec<String>>) -> Worksheet {
    let width = layout.columns.iter().map(|(_, i)| i + 1).max().unwrap_or(0);
    let header = (0..width).map(|i| format!("Column {}", i + 1)).collect();
    let mut grid = vec![header];
    grid.extend(rows);
    Worksheet::from_grid(grid).expect("test grid has a header row")
}
