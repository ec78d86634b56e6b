//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::Rubrique;

use super::types::{CompanySettings, PayrollConfig, RubriqueCatalog, StatutoryRates};

/// Loads, validates and provides access to payroll configuration.
///
/// Configuration is read once at startup and never mutated afterwards;
/// the API shares a single loader between all requests.
///
/// # Directory Structure
///
/// ```text
/// config/dz/
/// ├── company.yaml     # Company settings (working days, hourly base, CNAS ids)
/// ├── rubriques.yaml   # Rubrique catalog
/// └── statutory.yaml   # CNAS rate, IRG schedule, overtime multipliers, G50 estimate
/// ```
///
/// # Example
///
/// ```no_run
/// use paie_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/dz").unwrap();
/// println!("Company: {}", loader.company().name);
/// println!("Catalog size: {}", loader.catalog().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A divisor or rate fails validation (see [`PayrollConfig::validate`])
    ///
    /// # Example
    ///
    /// ```no_run
    /// use paie_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/dz")?;
    /// # Ok::<(), paie_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let company = Self::load_yaml::<CompanySettings>(&path.join("company.yaml"))?;
        let catalog = Self::load_yaml::<RubriqueCatalog>(&path.join("rubriques.yaml"))?;
        let statutory = Self::load_yaml::<StatutoryRates>(&path.join("statutory.yaml"))?;

        Self::from_config(PayrollConfig::new(company, catalog, statutory))
    }

    /// Wraps an already-built configuration after validating it.
    pub fn from_config(config: PayrollConfig) -> EngineResult<Self> {
        config.validate()?;
        debug!(
            working_days_count = config.company().working_days_count,
            hourly_base = %config.company().hourly_base,
            rubriques = config.catalog().len(),
            "Payroll configuration loaded"
        );
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the company settings.
    pub fn company(&self) -> &CompanySettings {
        self.config.company()
    }

    /// Returns the rubrique catalog.
    pub fn catalog(&self) -> &RubriqueCatalog {
        self.config.catalog()
    }

    /// Returns the statutory rates.
    pub fn statutory(&self) -> &StatutoryRates {
        self.config.statutory()
    }

    /// Creates an employee rubrique from the catalog.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use paie_engine::config::ConfigLoader;
    /// use rust_decimal::Decimal;
    ///
    /// let loader = ConfigLoader::load("./config/dz")?;
    /// let panier = loader.get_rubrique("PANIER", Decimal::new(3000, 0))?;
    /// assert!(!panier.is_cotisable);
    /// # Ok::<(), paie_engine::error::EngineError>(())
    /// ```
    pub fn get_rubrique(&self, id: &str, value: Decimal) -> EngineResult<Rubrique> {
        self.config.catalog().instantiate(id, value)
    }
}
