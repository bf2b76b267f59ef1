use assetdesk_core::error::CoreError;
use assetdesk_core::types::DbId;

/// Fatal import errors. Any of these aborts the run before a row is read.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to open workbook: {0}")]
    OpenWorkbook(String),

    #[error("workbook has no worksheet")]
    NoWorksheet,

    #[error("worksheet has no header row")]
    NoHeaderRow,

    #[error("default location {0} does not exist")]
    UnknownLocation(DbId),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Failure of a single [`InventoryStore`](crate::store::InventoryStore) call.
///
/// The engine turns these into row or batch error entries; they only abort
/// a run when raised during setup.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Rejected(String),
}

/// Invalid or missing environment configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}
