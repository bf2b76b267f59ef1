pub mod audit;
pub mod directory;
pub mod equipment;
pub mod location;
pub mod reference;
pub mod tech_config;
