//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods. Methods
//! take any Postgres executor, so the same query runs against the pool or
//! inside an import batch's open transaction.

pub mod audit_log_repo;
pub mod directory_repo;
pub mod equipment_repo;
pub mod location_repo;
pub mod reference_repo;
pub mod tech_config_repo;

pub use audit_log_repo::AuditLogRepo;
pub use directory_repo::{DirectoryAccountRepo, PersonRepo};
pub use equipment_repo::EquipmentRepo;
pub use location_repo::LocationRepo;
pub use reference_repo::{CategoryRepo, StatusRepo};
pub use tech_config_repo::TechConfigRepo;
