//! Overtime calculation.
//!
//! Overtime rubriques carry a number of hours. They are monetized at an
//! hourly rate derived from the base salary plus the fixed job indemnities
//! (`IEP`, `NUIS`, `DANGER` by default):
//!
//! - `HS50`: 150%
//! - `HS75`: 175%
//! - `HS100`: 200%
//!
//! Repeated entries for one overtime rubrique are added together.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::OvertimeConfig;
use crate::models::{AuditStep, Employee, OvertimeLine};

use super::positive_divisor;

/// The result of overtime calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeResult {
    /// Base salary plus the rate-base rubriques.
    pub rate_base: Decimal,
    /// rate_base / hourly base.
    pub hourly_rate: Decimal,
    /// One line per overtime rubrique the employee has.
    pub lines: Vec<OvertimeLine>,
    /// Sum of the line amounts.
    pub total: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Monetizes the employee's overtime hours.
///
/// Rubriques the employee does not have contribute nothing and produce no
/// line. A non-positive `hourly_base` is replaced by 1; configuration
/// validation rejects such values before they reach the engine.
///
/// # Examples
///
/// ```
/// use paie_engine::calculation::calculate_overtime;
/// use paie_engine::config::StatutoryRates;
/// use paie_engine::models::{Employee, Rubrique, RubriqueType};
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     base_salary: Decimal::new(40000, 0),
///     rubriques: vec![Rubrique {
///         id: "HS50".to_string(),
///         label: "Heures supplémentaires 50%".to_string(),
///         value: Decimal::new(10, 0),
///         is_cotisable: true,
///         is_imposable: true,
///         rubrique_type: RubriqueType::Variable,
///         is_deduction: false,
///     }],
///     ..Employee::default()
/// };
///
/// let rates = StatutoryRates::default();
/// let result = calculate_overtime(&employee, Decimal::new(17333, 2), &rates.overtime, 1);
///
/// assert_eq!(result.lines.len(), 1);
/// assert_eq!(result.total.round_dp(2), Decimal::new(346161, 2));
/// ```
pub fn calculate_overtime(
    employee: &Employee,
    hourly_base: Decimal,
    config: &OvertimeConfig,
    step_number: u32,
) -> OvertimeResult {
    let rate_base = employee.base_salary
        + config
            .rate_base_rubriques
            .iter()
            .map(|id| employee.rubrique_value(id))
            .sum::<Decimal>();

    let divisor = positive_divisor(hourly_base);
    let hourly_rate = rate_base / divisor;

    let lines: Vec<OvertimeLine> = config
        .multipliers
        .iter()
        .filter_map(|m| {
            employee.rubrique(&m.id)?;
            let hours = employee.rubrique_value(&m.id);
            Some(OvertimeLine {
                rubrique_id: m.id.clone(),
                hours,
                multiplier: m.multiplier,
                amount: hours * hourly_rate * m.multiplier,
            })
        })
        .collect();

    let total: Decimal = lines.iter().map(|l| l.amount).sum();
    let hours: Decimal = lines.iter().map(|l| l.hours).sum();

    let reasoning = if lines.is_empty() {
        "No overtime rubriques for this period".to_string()
    } else {
        format!(
            "{} overtime hours at hourly rate {} ({} / {}) = {}",
            hours.normalize(),
            hourly_rate.round_dp(4).normalize(),
            rate_base.normalize(),
            divisor.normalize(),
            total.round_dp(2).normalize()
        )
    };

    let hours_by_rubrique: serde_json::Map<String, serde_json::Value> = lines
        .iter()
        .map(|l| {
            (
                l.rubrique_id.clone(),
                serde_json::Value::String(l.hours.normalize().to_string()),
            )
        })
        .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime".to_string(),
        rule_name: "Overtime".to_string(),
        input: serde_json::json!({
            "base_salary": employee.base_salary.normalize().to_string(),
            "rate_base": rate_base.normalize().to_string(),
            "hourly_base": divisor.normalize().to_string(),
            "hours": hours_by_rubrique
        }),
        output: serde_json::json!({
            "hourly_rate": hourly_rate.normalize().to_string(),
            "total": total.normalize().to_string()
        }),
        reasoning,
    };

    OvertimeResult {
        rate_base,
        hourly_rate,
        lines,
        total,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatutoryRates;
    use crate::models::{Rubrique, RubriqueType};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rubrique(id: &str, value: &str) -> Rubrique {
        Rubrique {
            id: id.to_string(),
            label: id.to_string(),
            value: dec(value),
            is_cotisable: true,
            is_imposable: true,
            rubrique_type: RubriqueType::Variable,
            is_deduction: false,
        }
    }

    fn employee(base: &str, rubriques: Vec<Rubrique>) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            base_salary: dec(base),
            rubriques,
            ..Employee::default()
        }
    }

    fn config() -> OvertimeConfig {
        StatutoryRates::default().overtime
    }

    #[test]
    fn test_no_overtime_rubriques_yields_zero() {
        let result = calculate_overtime(&employee("40000", vec![]), dec("173.33"), &config(), 1);

        assert!(result.lines.is_empty());
        assert_eq!(result.total, Decimal::ZERO);
        assert_eq!(result.audit_step.rule_id, "overtime");
    }

    #[test]
    fn test_hs50_ten_hours_on_40000() {
        let emp = employee("40000", vec![rubrique("HS50", "10")]);
        let result = calculate_overtime(&emp, dec("173.33"), &config(), 1);

        let expected_rate = dec("40000") / dec("173.33");
        assert_eq!(result.hourly_rate, expected_rate);
        assert_eq!(result.hourly_rate.round_dp(2), dec("230.77"));
        assert_eq!(result.lines[0].multiplier, dec("1.5"));
        assert_eq!(result.total.round_dp(2), dec("3461.61"));
    }

    #[test]
    fn test_rate_base_includes_indemnities() {
        let emp = employee(
            "30000",
            vec![
                rubrique("IEP", "1000"),
                rubrique("NUIS", "500"),
                rubrique("DANGER", "300"),
                rubrique("PRI", "9999"),
            ],
        );
        let result = calculate_overtime(&emp, dec("173.33"), &config(), 1);

        assert_eq!(result.rate_base, dec("31800"));
    }

    #[test]
    fn test_repeated_overtime_rubrique_hours_are_summed() {
        let split = employee("40000", vec![rubrique("HS50", "4"), rubrique("HS50", "6")]);
        let single = employee("40000", vec![rubrique("HS50", "10")]);

        let split_result = calculate_overtime(&split, dec("173.33"), &config(), 1);
        let single_result = calculate_overtime(&single, dec("173.33"), &config(), 1);

        assert_eq!(split_result.lines.len(), 1);
        assert_eq!(split_result.lines[0].hours, dec("10"));
        assert_eq!(split_result.total, single_result.total);
    }

    #[test]
    fn test_all_three_multipliers() {
        let emp = employee(
            "17333",
            vec![
                rubrique("HS50", "2"),
                rubrique("HS75", "2"),
                rubrique("HS100", "2"),
            ],
        );
        // hourly rate is exactly 100
        let result = calculate_overtime(&emp, dec("173.33"), &config(), 1);

        assert_eq!(result.hourly_rate, dec("100"));
        assert_eq!(result.lines.len(), 3);
        assert_eq!(result.lines[0].amount, dec("300"));
        assert_eq!(result.lines[1].amount, dec("350"));
        assert_eq!(result.lines[2].amount, dec("400"));
        assert_eq!(result.total, dec("1050"));
    }

    #[test]
    fn test_lines_follow_configured_order() {
        let emp = employee(
            "17333",
            vec![rubrique("HS100", "1"), rubrique("HS50", "1")],
        );
        let result = calculate_overtime(&emp, dec("173.33"), &config(), 1);

        assert_eq!(result.lines[0].rubrique_id, "HS50");
        assert_eq!(result.lines[1].rubrique_id, "HS100");
    }

    #[test]
    fn test_zero_hourly_base_is_guarded() {
        let emp = employee("1000", vec![rubrique("HS50", "1")]);
        let result = calculate_overtime(&emp, Decimal::ZERO, &config(), 1);

        assert_eq!(result.hourly_rate, dec("1000"));
        assert_eq!(result.total, dec("1500"));
    }
}
