//! Per-row logic of the four import variants.

pub mod configuration;
pub mod full_inventory;
pub mod people;
pub mod registration;

mod apply;
