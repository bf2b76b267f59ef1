//! Import variants and how each one addresses its columns.

use serde::{Deserialize, Serialize};

use crate::fields::{PositionalLayout, CONFIGURATION_LAYOUT, FULL_INVENTORY_LAYOUT};

/// Which import pipeline a spreadsheet is fed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    /// Header-driven, create-only equipment registration.
    Registration,
    /// Positional technology-configuration update for existing equipment.
    Configuration,
    /// Positional create-or-update of the full equipment record.
    FullInventory,
    /// Header-driven directory account upsert.
    People,
}

/// How an import variant locates its fields.
#[derive(Debug, Clone, Copy)]
pub enum Addressing {
    HeaderMapped,
    Positional(&'static PositionalLayout),
}

impl ImportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registration => "registration",
            Self::Configuration => "configuration",
            Self::FullInventory => "full_inventory",
            Self::People => "people",
        }
    }

    /// Parse a variant name. Accepts `-` in place of `_`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "registration" => Some(Self::Registration),
            "configuration" => Some(Self::Configuration),
            "full_inventory" => Some(Self::FullInventory),
            "people" => Some(Self::People),
            _ => None,
        }
    }

    /// All valid variant names.
    pub const ALL: &'static [&'static str] =
        &["registration", "configuration", "full_inventory", "people"];

    pub fn addressing(&self) -> Addressing {
        match self {
            Self::Registration | Self::People => Addressing::HeaderMapped,
            Self::Configuration => Addressing::Positional(&CONFIGURATION_LAYOUT),
            Self::FullInventory => Addressing::Positional(&FULL_INVENTORY_LAYOUT),
        }
    }

    /// Singular and plural noun for the records this variant produces.
    pub fn record_noun(&self) -> (&'static str, &'static str) {
        match self {
            Self::People => ("directory account", "directory accounts"),
            _ => ("equipment", "equipment"),
        }
    }
}

impl std::fmt::Display for ImportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
