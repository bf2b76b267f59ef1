//! Canonical import fields and the fixed column layouts of the positional
//! spreadsheet templates.
//!
//! Header-mapped imports look a [`Field`] up by its canonical key (see
//! [`Field::key`]); positional imports look it up by column index in a
//! [`PositionalLayout`]. The two templates are versioned independently, so
//! the layouts are plain tables rather than anything derived from headers.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// A value the reconciliation engine reads from an import row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Tag,
    SerialNumber,
    Model,
    Manufacturer,
    Category,
    Status,
    /// Department or organisational unit.
    Unit,
    Location,
    Floor,
    Desk,
    AssignedUserName,
    AssignedUserEmail,
    PurchaseDate,
    PurchaseCost,
    WarrantyExpiry,
    Hostname,
    IpAddress,
    MacAddress,
    SwitchPort,
    WallPort,
    PhoneNumber,
    Extension,
    Imei,
    SimCardNumber,
    Notes,
    // Directory (people) import.
    ObjectId,
    UserPrincipalName,
    DisplayName,
    Mail,
    JobTitle,
    OfficeLocation,
    MobilePhone,
    AccountEnabled,
}

impl Field {
    /// Canonical header-map key for this field.
    ///
    /// Fields with a registered alias use the alias (e.g. `"OATHTag"`);
    /// the rest use the header text of the standard template.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Tag => "OATHTag",
            Self::SerialNumber => "SerialNumber",
            Self::Model => "Model",
            Self::Manufacturer => "Manufacturer",
            Self::Category => "Category",
            Self::Status => "Status",
            Self::Unit => "Unit",
            Self::Location => "Location",
            Self::Floor => "Floor",
            Self::Desk => "Desk",
            Self::AssignedUserName => "AssignedUserName",
            Self::AssignedUserEmail => "AssignedUserEmail",
            Self::PurchaseDate => "PurchaseDate",
            Self::PurchaseCost => "PurchaseCost",
            Self::WarrantyExpiry => "WarrantyExpiry",
            Self::Hostname => "NetName",
            Self::IpAddress => "IPAddress",
            Self::MacAddress => "MAC Address",
            Self::SwitchPort => "Switch Port",
            Self::WallPort => "Wall Port",
            Self::PhoneNumber => "PhoneNumber",
            Self::Extension => "Extension",
            Self::Imei => "IMEI",
            Self::SimCardNumber => "SIMCardNumber",
            Self::Notes => "Notes",
            Self::ObjectId => "ObjectId",
            Self::UserPrincipalName => "UserPrincipalName",
            Self::DisplayName => "DisplayName",
            Self::Mail => "Mail",
            Self::JobTitle => "JobTitle",
            Self::OfficeLocation => "OfficeLocation",
            Self::MobilePhone => "MobilePhone",
            Self::AccountEnabled => "AccountEnabled",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Fields whose presence triggers creation of a technology configuration.
pub const NETWORK_IDENTITY_FIELDS: &[Field] = &[Field::Hostname, Field::IpAddress, Field::MacAddress];

// ---------------------------------------------------------------------------
// Positional layouts
// ---------------------------------------------------------------------------

/// A fixed, contractually ordered column layout.
#[derive(Debug)]
pub struct PositionalLayout {
    pub name: &'static str,
    pub columns: &'static [(Field, usize)],
}

impl PositionalLayout {
    /// Column index of `field`, or `None` if the template has no such column.
    pub fn column(&self, field: Field) -> Option<usize> {
        self.columns
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, index)| *index)
    }
}

/// Full-inventory template (25 columns).
pub static FULL_INVENTORY_LAYOUT: PositionalLayout = PositionalLayout {
    name: "full_inventory_v1",
    columns: &[
        (Field::Tag, 0),
        (Field::SerialNumber, 1),
        (Field::Model, 2),
        (Field::Manufacturer, 3),
        (Field::Category, 4),
        (Field::Status, 5),
        (Field::Unit, 6),
        (Field::Location, 7),
        (Field::Floor, 8),
        (Field::Desk, 9),
        (Field::AssignedUserName, 10),
        (Field::AssignedUserEmail, 11),
        (Field::PurchaseDate, 12),
        (Field::PurchaseCost, 13),
        (Field::WarrantyExpiry, 14),
        (Field::Hostname, 15),
        (Field::IpAddress, 16),
        (Field::MacAddress, 17),
        (Field::SwitchPort, 18),
        (Field::WallPort, 19),
        (Field::PhoneNumber, 20),
        (Field::Extension, 21),
        (Field::Imei, 22),
        (Field::SimCardNumber, 23),
        (Field::Notes, 24),
    ],
};

/// Configuration-only template (10 columns).
pub static CONFIGURATION_LAYOUT: PositionalLayout = PositionalLayout {
    name: "configuration_v1",
    columns: &[
        (Field::Tag, 0),
        (Field::Hostname, 1),
        (Field::IpAddress, 2),
        (Field::MacAddress, 3),
        (Field::SwitchPort, 4),
        (Field::WallPort, 5),
        (Field::PhoneNumber, 6),
        (Field::Extension, 7),
        (Field::Imei, 8),
        (Field::SimCardNumber, 9),
    ],
};
