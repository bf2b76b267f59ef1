//! Directory accounts (identity-provider users) and people records.

use assetdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `directory_accounts`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DirectoryAccount {
    pub id: DbId,
    /// Identity-provider object id; absent for accounts keyed only by UPN.
    pub object_id: Option<String>,
    pub user_principal_name: String,
    pub display_name: String,
    pub mail: Option<String>,
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub office_location: Option<String>,
    pub mobile_phone: Option<String>,
    pub account_enabled: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DirectoryAccount {
    /// Preferred contact address: mail when present, otherwise the UPN.
    pub fn email(&self) -> &str {
        self.mail
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(&self.user_principal_name)
    }
}

/// DTO used for both insert and full update of a directory account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SaveDirectoryAccount {
    pub object_id: Option<String>,
    pub user_principal_name: String,
    pub display_name: String,
    pub mail: Option<String>,
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub office_location: Option<String>,
    pub mobile_phone: Option<String>,
    pub account_enabled: bool,
}

/// A row from `people`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Person {
    pub id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub directory_account_id: Option<DbId>,
    pub is_supervisor: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a person.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePerson {
    pub name: String,
    pub email: Option<String>,
    pub directory_account_id: Option<DbId>,
    /// Defaults to `false` if omitted.
    pub is_supervisor: Option<bool>,
}
