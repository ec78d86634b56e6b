//! Annual per-employee summary.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{PayPeriod, PayrollResult};

/// One employee's totals for a year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualEmployeeTotals {
    /// The employee.
    pub employee_id: String,
    /// Name from the latest payslip counted.
    pub employee_name: String,
    /// Number of monthly payslips counted.
    pub months: u32,
    /// Σ salaire_poste.
    pub gross: Decimal,
    /// Σ CNAS.
    pub cnas: Decimal,
    /// Σ IRG.
    pub irg: Decimal,
    /// Σ net.
    pub net: Decimal,
}

/// Yearly totals, one entry per employee ordered by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualSummary {
    /// The declared year.
    pub year: i32,
    /// Per-employee totals.
    pub employees: Vec<AnnualEmployeeTotals>,
    /// Σ of every employee's IRG.
    pub total_irg: Decimal,
    /// Σ of every employee's CNAS.
    pub total_cnas: Decimal,
}

/// Sums monthly payslips into per-employee yearly totals.
///
/// Payslips whose period is not a valid `YYYY-MM` in `year` are skipped.
///
/// # Examples
///
/// ```
/// use paie_engine::calculation::calculate_payroll_for;
/// use paie_engine::config::PayrollConfig;
/// use paie_engine::declarations::summarize_annual;
/// use paie_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let config = PayrollConfig::default();
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     base_salary: Decimal::from(50000),
///     is_socially_insured: true,
///     is_taxable: true,
///     ..Employee::default()
/// };
/// let results: Vec<_> = ["2025-01", "2025-02", "2024-12"]
///     .iter()
///     .map(|p| calculate_payroll_for(Some(&employee), &[], p, &config))
///     .collect();
///
/// let summary = summarize_annual(2025, &results);
/// assert_eq!(summary.employees[0].months, 2);
/// assert_eq!(summary.employees[0].irg, Decimal::from(14300));
/// ```
pub fn summarize_annual(year: i32, results: &[PayrollResult]) -> AnnualSummary {
    let mut by_employee: BTreeMap<&str, AnnualEmployeeTotals> = BTreeMap::new();

    for result in results {
        match PayPeriod::parse(&result.period) {
            Ok(period) if period.year() == year => {}
            _ => continue,
        }

        let totals = by_employee
            .entry(result.employee_id.as_str())
            .or_insert_with(|| AnnualEmployeeTotals {
                employee_id: result.employee_id.clone(),
                ..AnnualEmployeeTotals::default()
            });
        if !result.employee_name.is_empty() {
            totals.employee_name = result.employee_name.clone();
        }
        totals.months += 1;
        totals.gross += result.salaire_poste;
        totals.cnas += result.cnas;
        totals.irg += result.irg;
        totals.net += result.net;
    }

    let employees: Vec<AnnualEmployeeTotals> = by_employee.into_values().collect();
    let total_irg = employees.iter().map(|e| e.irg).sum();
    let total_cnas = employees.iter().map(|e| e.cnas).sum();

    AnnualSummary {
        year,
        employees,
        total_irg,
        total_cnas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuditTrace;

    fn result(employee_id: &str, period: &str, irg: i64) -> PayrollResult {
        PayrollResult {
            employee_id: employee_id.to_string(),
            employee_name: String::new(),
            period: period.to_string(),
            taux_journalier: Decimal::ZERO,
            jours_absents: 0,
            montant_retenue_absence: Decimal::ZERO,
            salaire_base_reel: Decimal::ZERO,
            has_penalty: false,
            real_bonus: Decimal::ZERO,
            taux_horaire: Decimal::ZERO,
            overtime_lines: vec![],
            total_primes_hs: Decimal::ZERO,
            primes_cotisables: Decimal::ZERO,
            salaire_poste: Decimal::from(40000),
            cnas: Decimal::from(3600),
            primes_imposables: Decimal::ZERO,
            base_imposable: Decimal::ZERO,
            base_imposable_arrondie: Decimal::ZERO,
            irg: Decimal::from(irg),
            primes_net: Decimal::ZERO,
            retenues_prets: Decimal::ZERO,
            autres_retenues: Decimal::ZERO,
            total_retenues: Decimal::ZERO,
            gains_totaux: Decimal::from(40000),
            net: Decimal::from(30000),
            audit_trace: AuditTrace::default(),
        }
    }

    #[test]
    fn test_groups_by_employee_sorted() {
        let results = vec![
            result("emp_b", "2025-01", 100),
            result("emp_a", "2025-01", 200),
            result("emp_b", "2025-02", 300),
        ];
        let summary = summarize_annual(2025, &results);

        assert_eq!(summary.employees.len(), 2);
        assert_eq!(summary.employees[0].employee_id, "emp_a");
        assert_eq!(summary.employees[1].employee_id, "emp_b");
        assert_eq!(summary.employees[1].months, 2);
        assert_eq!(summary.employees[1].irg, Decimal::from(400));
        assert_eq!(summary.employees[1].gross, Decimal::from(80000));
        assert_eq!(summary.total_irg, Decimal::from(600));
        assert_eq!(summary.total_cnas, Decimal::from(10800));
    }

    #[test]
    fn test_skips_other_years_and_invalid_periods() {
        let results = vec![
            result("emp_a", "2024-12", 100),
            result("emp_a", "bad", 100),
            result("emp_a", "2025-06", 50),
        ];
        let summary = summarize_annual(2025, &results);

        assert_eq!(summary.employees.len(), 1);
        assert_eq!(summary.employees[0].months, 1);
        assert_eq!(summary.total_irg, Decimal::from(50));
    }

    #[test]
    fn test_keeps_latest_nonempty_name() {
        let mut january = result("emp_a", "2025-01", 0);
        january.employee_name = "Karim Haddad".to_string();
        let mut february = result("emp_a", "2025-02", 0);
        february.employee_name = "Karim Haddad-Saidi".to_string();
        let march = result("emp_a", "2025-03", 0);

        let summary = summarize_annual(2025, &[january, february, march]);
        assert_eq!(summary.employees[0].employee_name, "Karim Haddad-Saidi");
    }

    #[test]
    fn test_empty_year() {
        let summary = summarize_annual(2025, &[]);
        assert!(summary.employees.is_empty());
        assert_eq!(summary.total_irg, Decimal::ZERO);
    }
}
