//! Configuration loading and management for the payroll engine.
//!
//! This module loads company settings, the rubrique catalog and the
//! statutory rates from YAML files, and validates the values the engine
//! divides by.
//!
//! # Example
//!
//! ```no_run
//! use paie_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/dz").unwrap();
//! println!("Working days: {}", config.company().working_days_count);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CnasConfig, CompanySettings, G50Config, IrgSchedule, OvertimeConfig, OvertimeMultiplier,
    PayrollConfig, RubriqueCatalog, RubriqueDefinition, StatutoryRates, default_hourly_base,
};
