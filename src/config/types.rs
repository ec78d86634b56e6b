//! Configuration types for payroll computation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML files of a configuration directory.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Rubrique, RubriqueType};

/// Company settings relevant to payroll.
///
/// The CNAS employer identifiers are carried for payslip and declaration
/// headers only; the engine never reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySettings {
    /// Company name.
    #[serde(default)]
    pub name: String,
    /// Divisor for the daily rate used by absence deductions (22 or 30).
    pub working_days_count: u32,
    /// Monthly legal hours, divisor for the overtime hourly rate.
    #[serde(default = "default_hourly_base")]
    pub hourly_base: Decimal,
    /// CNAS employer number.
    #[serde(default)]
    pub cnas_employer_number: String,
    /// Tax identification number.
    #[serde(default)]
    pub nif: String,
    /// Statistical identification number.
    #[serde(default)]
    pub nis: String,
    /// Trade register number.
    #[serde(default)]
    pub rc: String,
}

/// Legal monthly hours: 40h × 52 / 12.
pub fn default_hourly_base() -> Decimal {
    Decimal::new(17333, 2)
}

impl Default for CompanySettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            working_days_count: 30,
            hourly_base: default_hourly_base(),
            cnas_employer_number: String::new(),
            nif: String::new(),
            nis: String::new(),
            rc: String::new(),
        }
    }
}

/// A rubrique as defined in the catalog, before any value is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubriqueDefinition {
    /// Catalog identifier.
    pub id: String,
    /// Label printed on payslips.
    pub label: String,
    /// Counts toward the CNAS base.
    pub is_cotisable: bool,
    /// Counts toward the IRG base.
    pub is_imposable: bool,
    /// Fixed or variable.
    #[serde(rename = "type")]
    pub rubrique_type: RubriqueType,
    /// Manual deduction item.
    #[serde(default)]
    pub is_deduction: bool,
}

/// The immutable catalog of predefined rubriques.
///
/// Employees never reference catalog entries; [`RubriqueCatalog::instantiate`]
/// hands out an owned [`Rubrique`] carrying the catalog flags and the value
/// HR entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubriqueCatalog {
    /// Catalog entries in display order.
    pub rubriques: Vec<RubriqueDefinition>,
}

impl RubriqueCatalog {
    /// Looks up a definition by id.
    pub fn get(&self, id: &str) -> EngineResult<&RubriqueDefinition> {
        self.rubriques
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| EngineError::RubriqueNotFound { id: id.to_string() })
    }

    /// Creates an employee rubrique from a catalog entry.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use paie_engine::config::ConfigLoader;
    /// use rust_decimal::Decimal;
    ///
    /// let loader = ConfigLoader::load("./config/dz")?;
    /// let hs50 = loader.catalog().instantiate("HS50", Decimal::new(10, 0))?;
    /// assert!(hs50.is_cotisable);
    /// # Ok::<(), paie_engine::error::EngineError>(())
    /// ```
    pub fn instantiate(&self, id: &str, value: Decimal) -> EngineResult<Rubrique> {
        let definition = self.get(id)?;
        Ok(Rubrique {
            id: definition.id.clone(),
            label: definition.label.clone(),
            value,
            is_cotisable: definition.is_cotisable,
            is_imposable: definition.is_imposable,
            rubrique_type: definition.rubrique_type,
            is_deduction: definition.is_deduction,
        })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.rubriques.len()
    }

    /// True if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.rubriques.is_empty()
    }
}

/// CNAS contribution rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CnasConfig {
    /// Employee share withheld from the cotisable gross.
    pub employee_rate: Decimal,
}

/// The IRG schedule.
///
/// Bases at or below `exemption_threshold` pay nothing. Up to
/// `lower_band_ceiling` the gross tax is
/// `(base - exemption) × numerator / denominator`; above it the tax is
/// `crossing_amount` plus `middle_rate` up to `upper_threshold` plus
/// `upper_rate` beyond. The abatement is `abatement_rate` of the gross tax,
/// clamped to `[abatement_min, abatement_max]`. Strictly inside
/// `(exemption_threshold, lower_band_ceiling)` the final tax is replaced by
/// `(base - exemption) × transitional_rate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrgSchedule {
    /// Taxable bases are rounded down to a multiple of this.
    pub rounding_step: Decimal,
    /// Bases at or below this are exempt.
    pub exemption_threshold: Decimal,
    /// Upper bound of the lower band.
    pub lower_band_ceiling: Decimal,
    /// Lower band factor numerator.
    pub lower_band_numerator: Decimal,
    /// Lower band factor denominator.
    pub lower_band_denominator: Decimal,
    /// Fixed amount for crossing the exemption threshold.
    pub crossing_amount: Decimal,
    /// Rate between the exemption and the upper threshold.
    pub middle_rate: Decimal,
    /// Start of the top band.
    pub upper_threshold: Decimal,
    /// Rate above the upper threshold.
    pub upper_rate: Decimal,
    /// Abatement as a share of the gross tax.
    pub abatement_rate: Decimal,
    /// Minimum abatement.
    pub abatement_min: Decimal,
    /// Maximum abatement.
    pub abatement_max: Decimal,
    /// Rate used by the transitional override inside the lower band.
    pub transitional_rate: Decimal,
}

/// Multiplier for one overtime rubrique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeMultiplier {
    /// Overtime rubrique id (value interpreted as hours).
    pub id: String,
    /// Multiplier applied to the hourly rate.
    pub multiplier: Decimal,
}

/// Overtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeConfig {
    /// Rubriques added to the base salary to derive the hourly rate.
    pub rate_base_rubriques: Vec<String>,
    /// Overtime rubriques and their multipliers, in payslip order.
    pub multipliers: Vec<OvertimeMultiplier>,
}

impl OvertimeConfig {
    /// True if the rubrique id is an overtime rubrique.
    pub fn is_overtime(&self, id: &str) -> bool {
        self.multipliers.iter().any(|m| m.id == id)
    }
}

/// Parameters of the simplified IRG estimate used by the monthly G50
/// declaration. Independent of [`IrgSchedule`]; the two are not
/// reconciled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct G50Config {
    /// Salaries above this are included in the estimate.
    pub estimate_threshold: Decimal,
    /// Flat rate applied to each included salary.
    pub estimate_rate: Decimal,
}

/// All statutory rates loaded from `statutory.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryRates {
    /// CNAS contribution.
    pub cnas: CnasConfig,
    /// IRG schedule.
    pub irg: IrgSchedule,
    /// Overtime.
    pub overtime: OvertimeConfig,
    /// G50 estimate.
    pub g50: G50Config,
}

impl Default for StatutoryRates {
    fn default() -> Self {
        Self {
            cnas: CnasConfig {
                employee_rate: Decimal::new(9, 2),
            },
            irg: IrgSchedule {
                rounding_step: Decimal::from(10),
                exemption_threshold: Decimal::from(30000),
                lower_band_ceiling: Decimal::from(35000),
                lower_band_numerator: Decimal::from(8),
                lower_band_denominator: Decimal::from(3),
                crossing_amount: Decimal::from(4000),
                middle_rate: Decimal::new(30, 2),
                upper_threshold: Decimal::from(120000),
                upper_rate: Decimal::new(35, 2),
                abatement_rate: Decimal::new(40, 2),
                abatement_min: Decimal::from(1000),
                abatement_max: Decimal::from(1500),
                transitional_rate: Decimal::new(5, 1),
            },
            overtime: OvertimeConfig {
                rate_base_rubriques: vec!["IEP".into(), "NUIS".into(), "DANGER".into()],
                multipliers: vec![
                    OvertimeMultiplier {
                        id: "HS50".into(),
                        multiplier: Decimal::new(15, 1),
                    },
                    OvertimeMultiplier {
                        id: "HS75".into(),
                        multiplier: Decimal::new(175, 2),
                    },
                    OvertimeMultiplier {
                        id: "HS100".into(),
                        multiplier: Decimal::new(20, 1),
                    },
                ],
            },
            g50: G50Config {
                estimate_threshold: Decimal::from(30000),
                estimate_rate: Decimal::new(15, 2),
            },
        }
    }
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayrollConfig {
    company: CompanySettings,
    catalog: RubriqueCatalog,
    statutory: StatutoryRates,
}

impl PayrollConfig {
    /// Creates a configuration from its component parts.
    pub fn new(
        company: CompanySettings,
        catalog: RubriqueCatalog,
        statutory: StatutoryRates,
    ) -> Self {
        Self {
            company,
            catalog,
            statutory,
        }
    }

    /// Returns the company settings.
    pub fn company(&self) -> &CompanySettings {
        &self.company
    }

    /// Returns the rubrique catalog.
    pub fn catalog(&self) -> &RubriqueCatalog {
        &self.catalog
    }

    /// Returns the statutory rates.
    pub fn statutory(&self) -> &StatutoryRates {
        &self.statutory
    }

    /// Returns a copy with different company settings.
    pub fn with_company(mut self, company: CompanySettings) -> Self {
        self.company = company;
        self
    }

    /// Checks the values the engine divides by or clamps with.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |field: &str, message: &str| EngineError::InvalidConfig {
            field: field.to_string(),
            message: message.to_string(),
        };

        if self.company.working_days_count == 0 {
            return Err(invalid("working_days_count", "must be greater than zero"));
        }
        if self.company.hourly_base <= Decimal::ZERO {
            return Err(invalid("hourly_base", "must be greater than zero"));
        }
        if self.statutory.cnas.employee_rate < Decimal::ZERO {
            return Err(invalid("cnas.employee_rate", "cannot be negative"));
        }

        let irg = &self.statutory.irg;
        if irg.rounding_step <= Decimal::ZERO {
            return Err(invalid("irg.rounding_step", "must be greater than zero"));
        }
        if irg.lower_band_denominator <= Decimal::ZERO {
            return Err(invalid(
                "irg.lower_band_denominator",
                "must be greater than zero",
            ));
        }
        if irg.lower_band_ceiling < irg.exemption_threshold {
            return Err(invalid(
                "irg.lower_band_ceiling",
                "must not be below the exemption threshold",
            ));
        }
        if irg.upper_threshold < irg.exemption_threshold {
            return Err(invalid(
                "irg.upper_threshold",
                "must not be below the exemption threshold",
            ));
        }
        if irg.abatement_min > irg.abatement_max {
            return Err(invalid(
                "irg.abatement_min",
                "must not exceed irg.abatement_max",
            ));
        }

        for m in &self.statutory.overtime.multipliers {
            if m.multiplier < Decimal::ZERO {
                return Err(invalid(
                    &format!("overtime.multipliers.{}", m.id),
                    "cannot be negative",
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> RubriqueCatalog {
        RubriqueCatalog {
            rubriques: vec![RubriqueDefinition {
                id: "PANIER".to_string(),
                label: "Prime de panier".to_string(),
                is_cotisable: false,
                is_imposable: true,
                rubrique_type: RubriqueType::Fixed,
                is_deduction: false,
            }],
        }
    }

    fn valid_config() -> PayrollConfig {
        PayrollConfig::new(CompanySettings::default(), catalog(), StatutoryRates::default())
    }

    #[test]
    fn test_instantiate_copies_catalog_flags() {
        let rubrique = catalog()
            .instantiate("PANIER", Decimal::from(3000))
            .unwrap();
        assert_eq!(rubrique.id, "PANIER");
        assert_eq!(rubrique.value, Decimal::from(3000));
        assert!(!rubrique.is_cotisable);
        assert!(rubrique.is_imposable);
    }

    #[test]
    fn test_instantiate_unknown_id() {
        match catalog().instantiate("NOPE", Decimal::ONE) {
            Err(EngineError::RubriqueNotFound { id }) => assert_eq!(id, "NOPE"),
            other => panic!("Expected RubriqueNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_instantiated_rubrique_is_independent_copy() {
        let catalog = catalog();
        let mut first = catalog.instantiate("PANIER", Decimal::from(100)).unwrap();
        first.is_imposable = false;
        let second = catalog.instantiate("PANIER", Decimal::from(100)).unwrap();
        assert!(second.is_imposable);
        assert!(catalog.get("PANIER").unwrap().is_imposable);
    }

    #[test]
    fn test_default_company_settings() {
        let settings = CompanySettings::default();
        assert_eq!(settings.working_days_count, 30);
        assert_eq!(settings.hourly_base, Decimal::new(17333, 2));
    }

    #[test]
    fn test_overtime_ids() {
        let rates = StatutoryRates::default();
        assert!(rates.overtime.is_overtime("HS50"));
        assert!(rates.overtime.is_overtime("HS100"));
        assert!(!rates.overtime.is_overtime("IEP"));
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_working_days() {
        let config = valid_config().with_company(CompanySettings {
            working_days_count: 0,
            ..CompanySettings::default()
        });
        match config.validate() {
            Err(EngineError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "working_days_count")
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_non_positive_hourly_base() {
        let config = valid_config().with_company(CompanySettings {
            hourly_base: Decimal::new(-1, 0),
            ..CompanySettings::default()
        });
        match config.validate() {
            Err(EngineError::InvalidConfig { field, .. }) => assert_eq!(field, "hourly_base"),
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_inverted_abatement_bounds() {
        let mut statutory = StatutoryRates::default();
        statutory.irg.abatement_min = Decimal::from(2000);
        let config = PayrollConfig::new(CompanySettings::default(), catalog(), statutory);
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig { .. })
        ));
    }
}
