//! Monthly G50 declaration summary.
//!
//! The G50 total for IRG is reported two ways. `irg_engine` sums the IRG
//! withheld on each payslip. `irg_estimate` applies a flat rate to the base
//! salary of every employee above a threshold, straight from the employee
//! records. The two are not reconciled and usually differ; `irg_difference`
//! shows by how much.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::G50Config;
use crate::models::{Employee, PayrollResult};

/// Totals for one monthly G50 declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct G50Summary {
    /// The declared period.
    pub period: String,
    /// Number of payslips aggregated.
    pub employee_count: usize,
    /// Σ salaire_poste.
    pub total_salaire_poste: Decimal,
    /// Σ gains_totaux.
    pub total_gains: Decimal,
    /// Σ employee CNAS contributions.
    pub total_cnas: Decimal,
    /// Σ IRG withheld on the payslips.
    pub irg_engine: Decimal,
    /// Flat-rate IRG estimate from employee base salaries.
    pub irg_estimate: Decimal,
    /// irg_estimate - irg_engine.
    pub irg_difference: Decimal,
    /// Σ net pay.
    pub total_net: Decimal,
}

/// Flat IRG estimate: `rate × base_salary` for each employee whose base
/// salary exceeds the threshold.
///
/// # Examples
///
/// ```
/// use paie_engine::config::StatutoryRates;
/// use paie_engine::declarations::estimate_g50_irg;
/// use paie_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let employees = vec![
///     Employee { base_salary: Decimal::from(50000), ..Employee::default() },
///     Employee { base_salary: Decimal::from(30000), ..Employee::default() },
/// ];
/// let estimate = estimate_g50_irg(&employees, &StatutoryRates::default().g50);
/// assert_eq!(estimate, Decimal::from(7500));
/// ```
pub fn estimate_g50_irg(employees: &[Employee], config: &G50Config) -> Decimal {
    employees
        .iter()
        .filter(|e| e.base_salary > config.estimate_threshold)
        .map(|e| e.base_salary * config.estimate_rate)
        .sum()
}

/// Builds the G50 summary for a period from the month's payslips and the
/// employee records they were computed from.
pub fn summarize_g50(
    period: &str,
    employees: &[Employee],
    results: &[PayrollResult],
    config: &G50Config,
) -> G50Summary {
    let sum = |f: fn(&PayrollResult) -> Decimal| results.iter().map(f).sum::<Decimal>();

    let irg_engine = sum(|r| r.irg);
    let irg_estimate = estimate_g50_irg(employees, config);

    G50Summary {
        period: period.to_string(),
        employee_count: results.len(),
        total_salaire_poste: sum(|r| r.salaire_poste),
        total_gains: sum(|r| r.gains_totaux),
        total_cnas: sum(|r| r.cnas),
        irg_engine,
        irg_estimate,
        irg_difference: irg_estimate - irg_engine,
        total_net: sum(|r| r.net),
    }
}
