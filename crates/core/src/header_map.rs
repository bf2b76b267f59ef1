//! Header mapping and field extraction for header-driven imports.
//!
//! Spreadsheet templates drift: columns get reordered, decorated with `*`
//! for "required" or with parenthesised units, and renamed between template
//! versions. [`HeaderMap`] normalizes every header and additionally registers
//! known synonyms under a canonical key, so the engine can ask for
//! `"OATHTag"` regardless of whether the sheet says `OATH Tag*` or `Tag`.

use std::collections::HashMap;

use crate::sheet::SheetRow;

/// Normalized header text -> canonical key. Left side is already normalized.
pub const HEADER_ALIASES: &[(&str, &str)] = &[
    ("oath tag", "OATHTag"),
    ("tag", "OATHTag"),
    ("asset tag", "OATHTag"),
    ("net name hostname", "NetName"),
    ("net name", "NetName"),
    ("hostname", "NetName"),
    ("ip address", "IPAddress"),
    ("ipv4", "IPAddress"),
    ("ipv4 address", "IPAddress"),
    ("serial number", "SerialNumber"),
    ("serial", "SerialNumber"),
    ("phone number", "PhoneNumber"),
    ("purchase date", "PurchaseDate"),
    ("purchase cost", "PurchaseCost"),
    ("purchase cost $", "PurchaseCost"),
    ("warranty expiry", "WarrantyExpiry"),
    ("warranty expiration", "WarrantyExpiry"),
    ("assigned user email", "AssignedUserEmail"),
    ("assigned user name", "AssignedUserName"),
    ("imei", "IMEI"),
    ("imei number", "IMEI"),
    ("sim card number", "SIMCardNumber"),
    ("sim", "SIMCardNumber"),
    ("unit", "Unit"),
    ("department", "Unit"),
    ("object id", "ObjectId"),
    ("user principal name", "UserPrincipalName"),
    ("upn", "UserPrincipalName"),
    ("display name", "DisplayName"),
    ("mail", "Mail"),
    ("email", "Mail"),
    ("job title", "JobTitle"),
    ("office location", "OfficeLocation"),
    ("mobile phone", "MobilePhone"),
    ("account enabled", "AccountEnabled"),
];

/// Normalize a header (or a lookup key) for case-insensitive comparison.
///
/// Trims, strips `*`, `(` and `)`, collapses runs of whitespace, and
/// lowercases.
pub fn normalize_header(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| !matches!(c, '*' | '(' | ')'))
        .collect();
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Case-insensitive header text -> column index map.
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    columns: HashMap<String, usize>,
}

impl HeaderMap {
    /// Build the map from a worksheet's header row.
    ///
    /// Blank headers are ignored. When two columns normalize to the same
    /// key, the leftmost column wins.
    pub fn build(headers: &[String]) -> Self {
        let mut map = Self::default();
        for (index, header) in headers.iter().enumerate() {
            let normalized = normalize_header(header);
            if normalized.is_empty() {
                continue;
            }
            if let Some((_, canonical)) = HEADER_ALIASES.iter().find(|(h, _)| *h == normalized) {
                map.register(canonical, index);
            }
            map.register(&normalized, index);
        }
        map
    }

    fn register(&mut self, key: &str, index: usize) {
        self.columns.entry(normalize_header(key)).or_insert(index);
    }

    /// Column index for a header or canonical key, if the sheet has one.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.get(&normalize_header(name)).copied()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Fetch a named field's trimmed value from `row`.
///
/// Missing headers and missing cells both yield an empty string; this never
/// fails.
pub fn extract(row: &SheetRow, map: &HeaderMap, name: &str) -> String {
    map.column(name)
        .map(|index| row.cell(index).to_string())
        .unwrap_or_default()
}
