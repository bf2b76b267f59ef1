//! Audit trail action names and description builders.
//!
//! Audit entries are append-only and always refer to one equipment record.

use crate::kind::ImportKind;

/// Known action names for equipment audit entries.
pub mod actions {
    pub const IMPORT_CREATE: &str = "import_create";
    pub const IMPORT_UPDATE: &str = "import_update";
    pub const IMPORT_REACTIVATE: &str = "import_reactivate";
    pub const REGISTER: &str = "register";
    pub const CONFIGURATION_IMPORT: &str = "configuration_import";
    pub const FIELD_EDIT: &str = "field_edit";
}

/// Description for a change applied from a spreadsheet row.
pub fn import_description(kind: ImportKind, row_number: usize, tag: &str) -> String {
    format!("{kind} import of '{tag}' from spreadsheet row {row_number}")
}

/// Description for a single-field edit.
pub fn field_change_description(field: &str, old: &str, new: &str) -> String {
    format!("Changed {field} from '{old}' to '{new}'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_description_names_row_and_tag() {
        assert_eq!(
            import_description(ImportKind::FullInventory, 4, "OATH-1"),
            "full_inventory import of 'OATH-1' from spreadsheet row 4"
        );
    }

    #[test]
    fn field_change_description_quotes_values() {
        assert_eq!(
            field_change_description("model", "", "Latitude"),
            "Changed model from '' to 'Latitude'"
        );
    }
}
