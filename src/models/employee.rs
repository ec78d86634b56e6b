//! Employee model.
//!
//! The employee record carries everything the payroll engine reads: base
//! salary, presence bonus, insurance and tax flags, the employee's own
//! rubriques and loans. HR data entry owns and mutates these records; the
//! engine only reads them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Loan, Rubrique};

/// Represents an employee as seen by the payroll engine.
///
/// Missing collections deserialize as empty and both flags default to
/// `true`, so partially filled HR records still produce a payslip.
/// `Employee::default()` is the all-zero employee used when no record is
/// supplied at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// First name.
    #[serde(default)]
    pub first_name: String,
    /// Last name.
    #[serde(default)]
    pub last_name: String,
    /// Job title.
    #[serde(default)]
    pub position: String,
    /// Monthly base salary.
    #[serde(default)]
    pub base_salary: Decimal,
    /// Maximum monthly presence bonus, forfeited entirely on any absence or late arrival.
    #[serde(default)]
    pub presence_bonus: Decimal,
    /// Whether the employee is declared to CNAS.
    #[serde(default = "default_true")]
    pub is_socially_insured: bool,
    /// Whether IRG is withheld from this employee's salary.
    #[serde(default = "default_true")]
    pub is_taxable: bool,
    /// The employee's active rubriques, in payslip order.
    #[serde(default)]
    pub rubriques: Vec<Rubrique>,
    /// Loans granted to the employee.
    #[serde(default)]
    pub loans: Vec<Loan>,
}

fn default_true() -> bool {
    true
}

/// The all-zero employee used when none is supplied. Both flags are false,
/// unlike deserialization where a missing flag defaults to true.
impl Default for Employee {
    fn default() -> Self {
        Self {
            id: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            position: String::new(),
            base_salary: Decimal::ZERO,
            presence_bonus: Decimal::ZERO,
            is_socially_insured: false,
            is_taxable: false,
            rubriques: Vec::new(),
            loans: Vec::new(),
        }
    }
}

impl Employee {
    /// Returns "First Last", trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Returns the first rubrique with the given id.
    pub fn rubrique(&self, id: &str) -> Option<&Rubrique> {
        self.rubriques.iter().find(|r| r.id == id)
    }

    /// Returns the summed value of every rubrique with the given id, or zero
    /// when absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use paie_engine::models::{Employee, Rubrique, RubriqueType};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     base_salary: Decimal::new(40000, 0),
    ///     rubriques: vec![Rubrique {
    ///         id: "IEP".to_string(),
    ///         label: "IEP".to_string(),
    ///         value: Decimal::new(1200, 0),
    ///         is_cotisable: true,
    ///         is_imposable: true,
    ///         rubrique_type: RubriqueType::Fixed,
    ///         is_deduction: false,
    ///     }],
    ///     ..Employee::default()
    /// };
    /// assert_eq!(employee.rubrique_value("IEP"), Decimal::new(1200, 0));
    /// assert_eq!(employee.rubrique_value("NUIS"), Decimal::ZERO);
    /// ```
    pub fn rubrique_value(&self, id: &str) -> Decimal {
        self.rubriques
            .iter()
            .filter(|r| r.id == id)
            .map(|r| r.value)
            .sum()
    }
}
