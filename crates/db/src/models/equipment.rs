//! Equipment records and the save DTO shared by import and inline edit.

use assetdesk_core::edit::{EquipmentField, FieldValue};
use assetdesk_core::error::CoreError;
use assetdesk_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `equipment` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Equipment {
    pub id: DbId,
    pub tag: String,
    pub serial_number: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub category_id: Option<DbId>,
    pub status_id: Option<DbId>,
    pub location_id: Option<DbId>,
    pub floor_plan_id: Option<DbId>,
    pub desk_id: Option<DbId>,
    pub assigned_name: Option<String>,
    pub assigned_email: Option<String>,
    pub directory_account_id: Option<DbId>,
    pub unit: Option<String>,
    pub notes: Option<String>,
    pub purchase_date: Option<Date>,
    pub purchase_cost: Option<f64>,
    pub warranty_expiry: Option<Date>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Full set of writable equipment columns, used for both insert and update.
///
/// Updates replace every column, so callers start from
/// `SaveEquipment::from(&existing)` and change only what they mean to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SaveEquipment {
    pub tag: String,
    pub serial_number: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub category_id: Option<DbId>,
    pub status_id: Option<DbId>,
    pub location_id: Option<DbId>,
    pub floor_plan_id: Option<DbId>,
    pub desk_id: Option<DbId>,
    pub assigned_name: Option<String>,
    pub assigned_email: Option<String>,
    pub directory_account_id: Option<DbId>,
    pub unit: Option<String>,
    pub notes: Option<String>,
    pub purchase_date: Option<Date>,
    pub purchase_cost: Option<f64>,
    pub warranty_expiry: Option<Date>,
    pub is_active: bool,
}

impl SaveEquipment {
    /// A new, active record with only its natural key set.
    pub fn new(tag: impl Into<String>, serial_number: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            serial_number: serial_number.into(),
            manufacturer: None,
            model: None,
            category_id: None,
            status_id: None,
            location_id: None,
            floor_plan_id: None,
            desk_id: None,
            assigned_name: None,
            assigned_email: None,
            directory_account_id: None,
            unit: None,
            notes: None,
            purchase_date: None,
            purchase_cost: None,
            warranty_expiry: None,
            is_active: true,
        }
    }

    /// Current value of an editable field.
    pub fn field_value(&self, field: EquipmentField) -> FieldValue {
        match field {
            EquipmentField::SerialNumber => FieldValue::Text(Some(self.serial_number.clone())),
            EquipmentField::Model => FieldValue::Text(self.model.clone()),
            EquipmentField::Manufacturer => FieldValue::Text(self.manufacturer.clone()),
            EquipmentField::Unit => FieldValue::Text(self.unit.clone()),
            EquipmentField::Notes => FieldValue::Text(self.notes.clone()),
            EquipmentField::AssignedName => FieldValue::Text(self.assigned_name.clone()),
            EquipmentField::AssignedEmail => FieldValue::Text(self.assigned_email.clone()),
            EquipmentField::PurchaseDate => FieldValue::Date(self.purchase_date),
            EquipmentField::PurchaseCost => FieldValue::Currency(self.purchase_cost),
            EquipmentField::WarrantyExpiry => FieldValue::Date(self.warranty_expiry),
        }
    }

    /// Set one editable field, returning the previous value's display text.
    ///
    /// Fails if `value` is of the wrong kind for `field`, or would blank the
    /// serial number.
    pub fn apply_edit(
        &mut self,
        field: EquipmentField,
        value: FieldValue,
    ) -> Result<String, CoreError> {
        let old = self.field_value(field).display();
        match (field, value) {
            (EquipmentField::SerialNumber, FieldValue::Text(Some(v))) => self.serial_number = v,
            (EquipmentField::SerialNumber, FieldValue::Text(None)) => {
                return Err(CoreError::Validation(
                    "serial_number cannot be empty".to_string(),
                ));
            }
            (EquipmentField::Model, FieldValue::Text(v)) => self.model = v,
            (EquipmentField::Manufacturer, FieldValue::Text(v)) => self.manufacturer = v,
            (EquipmentField::Unit, FieldValue::Text(v)) => self.unit = v,
            (EquipmentField::Notes, FieldValue::Text(v)) => self.notes = v,
            (EquipmentField::AssignedName, FieldValue::Text(v)) => self.assigned_name = v,
            (EquipmentField::AssignedEmail, FieldValue::Text(v)) => self.assigned_email = v,
            (EquipmentField::PurchaseDate, FieldValue::Date(v)) => self.purchase_date = v,
            (EquipmentField::WarrantyExpiry, FieldValue::Date(v)) => self.warranty_expiry = v,
            (EquipmentField::PurchaseCost, FieldValue::Currency(v)) => self.purchase_cost = v,
            (field, value) => {
                return Err(CoreError::Internal(format!(
                    "value {value:?} does not fit field {field}"
                )));
            }
        }
        Ok(old)
    }
}

impl From<&Equipment> for SaveEquipment {
    fn from(e: &Equipment) -> Self {
        Self {
            tag: e.tag.clone(),
            serial_number: e.serial_number.clone(),
            manufacturer: e.manufacturer.clone(),
            model: e.model.clone(),
            category_id: e.category_id,
            status_id: e.status_id,
            location_id: e.location_id,
            floor_plan_id: e.floor_plan_id,
            desk_id: e.desk_id,
            assigned_name: e.assigned_name.clone(),
            assigned_email: e.assigned_email.clone(),
            directory_account_id: e.directory_account_id,
            unit: e.unit.clone(),
            notes: e.notes.clone(),
            purchase_date: e.purchase_date,
            purchase_cost: e.purchase_cost,
            warranty_expiry: e.warranty_expiry,
            is_active: e.is_active,
        }
    }
}
