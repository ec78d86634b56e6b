//! Rubrique (payslip line item) model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a rubrique carries the same value every month or is entered per period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RubriqueType {
    /// Recurring amount tied to the job (e.g. experience indemnity).
    Fixed,
    /// Amount or quantity entered for the period (e.g. overtime hours).
    Variable,
}

/// A named line item on a payslip, owned by one employee.
///
/// `value` is a currency amount, except for the overtime rubriques
/// (`HS50`, `HS75`, `HS100`) where it is a number of hours.
///
/// # Example
///
/// ```
/// use paie_engine::models::{Rubrique, RubriqueType};
/// use rust_decimal::Decimal;
///
/// let iep = Rubrique {
///     id: "IEP".to_string(),
///     label: "Indemnité d'expérience professionnelle".to_string(),
///     value: Decimal::new(2500, 0),
///     is_cotisable: true,
///     is_imposable: true,
///     rubrique_type: RubriqueType::Fixed,
///     is_deduction: false,
/// };
/// assert!(iep.is_cotisable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rubrique {
    /// Catalog identifier (e.g. "IEP", "HS50").
    pub id: String,
    /// Human-readable label printed on the payslip.
    #[serde(default)]
    pub label: String,
    /// Amount for the period, or hours for overtime rubriques.
    #[serde(default)]
    pub value: Decimal,
    /// Counts toward the CNAS contribution base.
    #[serde(default)]
    pub is_cotisable: bool,
    /// Counts toward the IRG taxable base.
    #[serde(default)]
    pub is_imposable: bool,
    /// Fixed or variable.
    #[serde(rename = "type", default = "default_rubrique_type")]
    pub rubrique_type: RubriqueType,
    /// Manual deduction (salary advance, manual absence correction, ...).
    #[serde(default)]
    pub is_deduction: bool,
}

fn default_rubrique_type() -> RubriqueType {
    RubriqueType::Variable
}
