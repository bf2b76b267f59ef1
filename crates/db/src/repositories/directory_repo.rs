//! Repositories for `directory_accounts` and `people`.

use assetdesk_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::directory::{CreatePerson, DirectoryAccount, Person, SaveDirectoryAccount};

const ACCOUNT_COLUMNS: &str = "id, object_id, user_principal_name, display_name, mail, \
    job_title, department, office_location, mobile_phone, account_enabled, \
    created_at, updated_at";

const PERSON_COLUMNS: &str =
    "id, name, email, directory_account_id, is_supervisor, created_at, updated_at";

/// Directory account lookups and writes.
pub struct DirectoryAccountRepo;

impl DirectoryAccountRepo {
    /// Match an address against either `mail` or the principal name,
    /// ignoring case. Mail matches are preferred.
    pub async fn find_by_email_or_upn<'e, E>(
        db: E,
        email: &str,
    ) -> Result<Option<DirectoryAccount>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {ACCOUNT_COLUMNS} FROM directory_accounts
             WHERE LOWER(mail) = LOWER($1) OR LOWER(user_principal_name) = LOWER($1)
             ORDER BY (LOWER(mail) = LOWER($1)) DESC NULLS LAST, id
             LIMIT 1"
        );
        sqlx::query_as::<_, DirectoryAccount>(&query)
            .bind(email)
            .fetch_optional(db)
            .await
    }

    /// Find the account an import row refers to: by object id when given,
    /// otherwise by principal name.
    pub async fn find_by_key<'e, E>(
        db: E,
        object_id: Option<&str>,
        user_principal_name: &str,
    ) -> Result<Option<DirectoryAccount>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        match object_id {
            Some(object_id) => {
                let query =
                    format!("SELECT {ACCOUNT_COLUMNS} FROM directory_accounts WHERE object_id = $1");
                sqlx::query_as::<_, DirectoryAccount>(&query)
                    .bind(object_id)
                    .fetch_optional(db)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {ACCOUNT_COLUMNS} FROM directory_accounts
                     WHERE LOWER(user_principal_name) = LOWER($1)"
                );
                sqlx::query_as::<_, DirectoryAccount>(&query)
                    .bind(user_principal_name)
                    .fetch_optional(db)
                    .await
            }
        }
    }

    pub async fn create<'e, E>(
        db: E,
        input: &SaveDirectoryAccount,
    ) -> Result<DirectoryAccount, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO directory_accounts
                (object_id, user_principal_name, display_name, mail, job_title,
                 department, office_location, mobile_phone, account_enabled)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {ACCOUNT_COLUMNS}"
        );
        sqlx::query_as::<_, DirectoryAccount>(&query)
            .bind(&input.object_id)
            .bind(&input.user_principal_name)
            .bind(&input.display_name)
            .bind(&input.mail)
            .bind(&input.job_title)
            .bind(&input.department)
            .bind(&input.office_location)
            .bind(&input.mobile_phone)
            .bind(input.account_enabled)
            .fetch_one(db)
            .await
    }

    /// Overwrite every column of an account.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e, E>(
        db: E,
        id: DbId,
        input: &SaveDirectoryAccount,
    ) -> Result<Option<DirectoryAccount>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE directory_accounts SET
                object_id = $2,
                user_principal_name = $3,
                display_name = $4,
                mail = $5,
                job_title = $6,
                department = $7,
                office_location = $8,
                mobile_phone = $9,
                account_enabled = $10,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {ACCOUNT_COLUMNS}"
        );
        sqlx::query_as::<_, DirectoryAccount>(&query)
            .bind(id)
            .bind(&input.object_id)
            .bind(&input.user_principal_name)
            .bind(&input.display_name)
            .bind(&input.mail)
            .bind(&input.job_title)
            .bind(&input.department)
            .bind(&input.office_location)
            .bind(&input.mobile_phone)
            .bind(input.account_enabled)
            .fetch_optional(db)
            .await
    }
}

/// Supervisor-tracking people records.
pub struct PersonRepo;

impl PersonRepo {
    /// Insert a person. `is_supervisor` defaults to `false`.
    pub async fn create<'e, E>(db: E, input: &CreatePerson) -> Result<Person, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO people (name, email, directory_account_id, is_supervisor)
             VALUES ($1, $2, $3, COALESCE($4, false))
             RETURNING {PERSON_COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.directory_account_id)
            .bind(input.is_supervisor)
            .fetch_one(db)
            .await
    }

    pub async fn list_by_directory_account<'e, E>(
        db: E,
        directory_account_id: DbId,
    ) -> Result<Vec<Person>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {PERSON_COLUMNS} FROM people WHERE directory_account_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(directory_account_id)
            .fetch_all(db)
            .await
    }
}
