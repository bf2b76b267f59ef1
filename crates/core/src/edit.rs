//! Single-field equipment edits.
//!
//! The inline editor sends a field name and raw text. Instead of resolving
//! the name against the record at runtime, every editable field is listed in
//! [`EquipmentField`] with its value kind; the typed setter lives next to the
//! save DTO in `assetdesk-db`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::parse::{non_empty, parse_currency, parse_date};
use crate::types::Date;

/// Fields the inline editor may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentField {
    SerialNumber,
    Model,
    Manufacturer,
    Unit,
    Notes,
    AssignedName,
    AssignedEmail,
    PurchaseDate,
    PurchaseCost,
    WarrantyExpiry,
}

/// Value type of an editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
    Currency,
}

/// A parsed edit value. `None` clears the field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(Option<String>),
    Date(Option<Date>),
    Currency(Option<f64>),
}

impl FieldValue {
    /// Text rendering used in audit descriptions.
    pub fn display(&self) -> String {
        match self {
            Self::Text(v) => v.clone().unwrap_or_default(),
            Self::Date(v) => v.map(|d| d.to_string()).unwrap_or_default(),
            Self::Currency(v) => v.map(|c| format!("{c:.2}")).unwrap_or_default(),
        }
    }
}

impl EquipmentField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SerialNumber => "serial_number",
            Self::Model => "model",
            Self::Manufacturer => "manufacturer",
            Self::Unit => "unit",
            Self::Notes => "notes",
            Self::AssignedName => "assigned_name",
            Self::AssignedEmail => "assigned_email",
            Self::PurchaseDate => "purchase_date",
            Self::PurchaseCost => "purchase_cost",
            Self::WarrantyExpiry => "warranty_expiry",
        }
    }

    /// Look a field up by name, ignoring case and underscores, so both
    /// `serial_number` and `SerialNumber` resolve.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim().replace('_', "").to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.as_str().replace('_', "") == wanted)
    }

    pub const ALL: &'static [EquipmentField] = &[
        Self::SerialNumber,
        Self::Model,
        Self::Manufacturer,
        Self::Unit,
        Self::Notes,
        Self::AssignedName,
        Self::AssignedEmail,
        Self::PurchaseDate,
        Self::PurchaseCost,
        Self::WarrantyExpiry,
    ];

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::PurchaseDate | Self::WarrantyExpiry => FieldKind::Date,
            Self::PurchaseCost => FieldKind::Currency,
            _ => FieldKind::Text,
        }
    }

    /// Parse raw editor input for this field.
    ///
    /// Unlike spreadsheet import, unparseable input is a validation error:
    /// the editor reports it back instead of silently dropping it.
    pub fn parse(&self, raw: &str) -> Result<FieldValue, CoreError> {
        let text = non_empty(raw);
        match self.kind() {
            FieldKind::Text => {
                if *self == Self::SerialNumber && text.is_none() {
                    return Err(CoreError::Validation(
                        "serial_number cannot be empty".to_string(),
                    ));
                }
                Ok(FieldValue::Text(text))
            }
            FieldKind::Date => match text {
                None => Ok(FieldValue::Date(None)),
                Some(t) => parse_date(&t).map(|d| FieldValue::Date(Some(d))).ok_or_else(|| {
                    CoreError::Validation(format!("'{t}' is not a valid date for {}", self.as_str()))
                }),
            },
            FieldKind::Currency => match text {
                None => Ok(FieldValue::Currency(None)),
                Some(t) => parse_currency(&t)
                    .map(|c| FieldValue::Currency(Some(c)))
                    .ok_or_else(|| {
                        CoreError::Validation(format!(
                            "'{t}' is not a valid amount for {}",
                            self.as_str()
                        ))
                    }),
            },
        }
    }
}

impl std::fmt::Display for EquipmentField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
