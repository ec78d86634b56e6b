//! Payroll orchestration.
//!
//! [`calculate_payroll`] combines the absence adjustment, overtime, rubrique
//! classification, CNAS, IRG and loan deductions into one [`PayrollResult`].
//! It is a pure function of its inputs and never fails: incomplete inputs
//! are resolved to defaults when the [`PayrollInput`] is built, and the
//! resulting payslip shows zeros rather than raising an error.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::config::{OvertimeConfig, PayrollConfig};
use crate::models::{
    AttendanceRecord, AuditStep, AuditTrace, AuditWarning, Employee, PayPeriod, PayrollResult,
    Rubrique,
};

use super::absence::calculate_absence_adjustment;
use super::irg::calculate_irg;
use super::loans::calculate_loan_deductions;
use super::overtime::calculate_overtime;

/// A fully resolved payroll input.
///
/// Building the input settles every default up front: a missing employee
/// becomes the all-zero [`Employee::default`], attendance is restricted to
/// the employee and month being paid, and an unparseable period leaves no
/// attendance at all. Each such fallback is reported as an [`AuditWarning`]
/// on the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollInput {
    employee: Employee,
    attendance: Vec<AttendanceRecord>,
    period: String,
    warnings: Vec<AuditWarning>,
}

impl PayrollInput {
    /// Resolves raw inputs into a payroll input.
    ///
    /// # Examples
    ///
    /// ```
    /// use paie_engine::calculation::PayrollInput;
    /// use paie_engine::models::{AttendanceRecord, AttendanceStatus, Employee};
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee { id: "emp_001".to_string(), ..Employee::default() };
    /// let attendance = vec![
    ///     AttendanceRecord {
    ///         employee_id: "emp_001".to_string(),
    ///         date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
    ///         status: AttendanceStatus::Absent,
    ///     },
    ///     AttendanceRecord {
    ///         employee_id: "emp_001".to_string(),
    ///         date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
    ///         status: AttendanceStatus::Absent,
    ///     },
    /// ];
    ///
    /// let input = PayrollInput::new(Some(&employee), &attendance, "2025-03");
    /// assert_eq!(input.attendance().len(), 1);
    /// assert!(input.warnings().is_empty());
    /// ```
    pub fn new(employee: Option<&Employee>, attendance: &[AttendanceRecord], period: &str) -> Self {
        let mut warnings = Vec::new();

        let employee = match employee {
            Some(employee) => employee.clone(),
            None => {
                warnings.push(AuditWarning {
                    code: "MISSING_EMPLOYEE".to_string(),
                    message: "No employee record supplied; computing an all-zero payslip"
                        .to_string(),
                });
                Employee::default()
            }
        };

        let attendance = match PayPeriod::parse(period) {
            Ok(parsed) => attendance
                .iter()
                .filter(|r| r.employee_id == employee.id && parsed.contains_date(r.date))
                .cloned()
                .collect(),
            Err(err) => {
                warnings.push(AuditWarning {
                    code: "INVALID_PERIOD".to_string(),
                    message: format!("{}; attendance ignored", err),
                });
                Vec::new()
            }
        };

        Self {
            employee,
            attendance,
            period: period.to_string(),
            warnings,
        }
    }

    /// The employee being paid.
    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    /// Attendance records for the employee within the period.
    pub fn attendance(&self) -> &[AttendanceRecord] {
        &self.attendance
    }

    /// The period string as supplied.
    pub fn period(&self) -> &str {
        &self.period
    }

    /// Fallbacks taken while resolving the input.
    pub fn warnings(&self) -> &[AuditWarning] {
        &self.warnings
    }
}

/// Rubrique totals by payroll treatment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RubriqueTotals {
    cotisable: Decimal,
    imposable: Decimal,
    net: Decimal,
    deductions: Decimal,
}

/// Splits rubrique values by treatment. Overtime rubriques hold hours, not
/// money, and are left out; they are monetized separately.
fn classify_rubriques(rubriques: &[Rubrique], overtime: &OvertimeConfig) -> RubriqueTotals {
    rubriques
        .iter()
        .filter(|r| !overtime.is_overtime(&r.id))
        .fold(RubriqueTotals::default(), |mut totals, r| {
            if r.is_deduction {
                totals.deductions += r.value;
            } else if r.is_cotisable {
                totals.cotisable += r.value;
            } else if r.is_imposable {
                totals.imposable += r.value;
            } else {
                totals.net += r.value;
            }
            totals
        })
}

/// Computes one employee's payslip for one month.
///
/// # Examples
///
/// ```
/// use paie_engine::calculation::{PayrollInput, calculate_payroll};
/// use paie_engine::config::PayrollConfig;
/// use paie_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     base_salary: Decimal::from(50000),
///     is_socially_insured: true,
///     is_taxable: true,
///     ..Employee::default()
/// };
///
/// let input = PayrollInput::new(Some(&employee), &[], "2025-03");
/// let result = calculate_payroll(&input, &PayrollConfig::default());
///
/// assert_eq!(result.cnas, Decimal::new(450000, 2));
/// assert_eq!(result.base_imposable, Decimal::from(45500));
/// assert_eq!(result.irg, Decimal::from(7150));
/// assert_eq!(result.net, Decimal::from(38350));
/// ```
pub fn calculate_payroll(input: &PayrollInput, config: &PayrollConfig) -> PayrollResult {
    let employee = input.employee();
    let company = config.company();
    let rates = config.statutory();
    let mut steps: Vec<AuditStep> = Vec::with_capacity(7);

    let absence = calculate_absence_adjustment(
        employee,
        input.attendance(),
        company.working_days_count,
        1,
    );
    steps.push(absence.audit_step.clone());

    let overtime = calculate_overtime(employee, company.hourly_base, &rates.overtime, 2);
    steps.push(overtime.audit_step.clone());

    let totals = classify_rubriques(&employee.rubriques, &rates.overtime);
    steps.push(AuditStep {
        step_number: 3,
        rule_id: "rubrique_classification".to_string(),
        rule_name: "Rubrique Classification".to_string(),
        input: serde_json::json!({
            "rubriques": employee.rubriques.iter().map(|r| r.id.clone()).collect::<Vec<_>>()
        }),
        output: serde_json::json!({
            "cotisable": totals.cotisable.normalize().to_string(),
            "imposable": totals.imposable.normalize().to_string(),
            "net": totals.net.normalize().to_string(),
            "deductions": totals.deductions.normalize().to_string()
        }),
        reasoning: "Overtime rubriques excluded; deduction rubriques withheld from net".to_string(),
    });

    let salaire_poste =
        absence.adjusted_base_salary + totals.cotisable + overtime.total + absence.real_bonus;

    let cnas = if employee.is_socially_insured {
        (salaire_poste * rates.cnas.employee_rate)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    } else {
        Decimal::ZERO
    };
    steps.push(AuditStep {
        step_number: 4,
        rule_id: "cnas".to_string(),
        rule_name: "CNAS Contribution".to_string(),
        input: serde_json::json!({
            "salaire_poste": salaire_poste.normalize().to_string(),
            "is_socially_insured": employee.is_socially_insured,
            "rate": rates.cnas.employee_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "cnas": cnas.normalize().to_string()
        }),
        reasoning: if employee.is_socially_insured {
            format!(
                "{} × {} = {}",
                salaire_poste.round_dp(2).normalize(),
                rates.cnas.employee_rate.normalize(),
                cnas.normalize()
            )
        } else {
            "Employee not declared to CNAS".to_string()
        },
    });

    let base_imposable = if employee.is_socially_insured {
        (salaire_poste - cnas) + totals.imposable
    } else {
        salaire_poste + totals.imposable
    };

    let irg = calculate_irg(base_imposable, employee.is_taxable, &rates.irg, 5);
    steps.push(irg.audit_step.clone());

    let loans = calculate_loan_deductions(&employee.loans, 6);
    steps.push(loans.audit_step.clone());

    let total_retenues = cnas + irg.irg + loans.total + totals.deductions;
    let gains_totaux = salaire_poste + totals.imposable + totals.net + absence.deduction;
    let net = salaire_poste + totals.imposable + totals.net - total_retenues;

    steps.push(AuditStep {
        step_number: 7,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "salaire_poste": salaire_poste.normalize().to_string(),
            "primes_imposables": totals.imposable.normalize().to_string(),
            "primes_net": totals.net.normalize().to_string(),
            "total_retenues": total_retenues.normalize().to_string()
        }),
        output: serde_json::json!({
            "gains_totaux": gains_totaux.normalize().to_string(),
            "net": net.normalize().to_string()
        }),
        reasoning: format!(
            "Net = {} + {} + {} - {} = {}",
            salaire_poste.round_dp(2).normalize(),
            totals.imposable.normalize(),
            totals.net.normalize(),
            total_retenues.round_dp(2).normalize(),
            net.round_dp(2).normalize()
        ),
    });

    debug!(
        employee_id = %employee.id,
        period = %input.period(),
        salaire_poste = %salaire_poste,
        cnas = %cnas,
        irg = %irg.irg,
        net = %net,
        "Payroll computed"
    );

    PayrollResult {
        employee_id: employee.id.clone(),
        employee_name: employee.full_name(),
        period: input.period().to_string(),
        taux_journalier: absence.daily_rate,
        jours_absents: absence.absent_days,
        montant_retenue_absence: absence.deduction,
        salaire_base_reel: absence.adjusted_base_salary,
        has_penalty: absence.has_penalty,
        real_bonus: absence.real_bonus,
        taux_horaire: overtime.hourly_rate,
        overtime_lines: overtime.lines,
        total_primes_hs: overtime.total,
        primes_cotisables: totals.cotisable,
        salaire_poste,
        cnas,
        primes_imposables: totals.imposable,
        base_imposable,
        base_imposable_arrondie: irg.rounded_base,
        irg: irg.irg,
        primes_net: totals.net,
        retenues_prets: loans.total,
        autres_retenues: totals.deductions,
        total_retenues,
        gains_totaux,
        net,
        audit_trace: AuditTrace {
            steps,
            warnings: input.warnings().to_vec(),
        },
    }
}

/// Computes a payslip from the raw (employee, attendance, period) tuple.
pub fn calculate_payroll_for(
    employee: Option<&Employee>,
    attendance: &[AttendanceRecord],
    period: &str,
    config: &PayrollConfig,
) -> PayrollResult {
    calculate_payroll(&PayrollInput::new(employee, attendance, period), config)
}

/// Computes payslips for every employee for one period.
///
/// Results follow the order of `employees`. Each result depends only on its
/// own employee, so reordering the input reorders the output without
/// changing any payslip.
pub fn calculate_payroll_batch(
    employees: &[Employee],
    attendance: &[AttendanceRecord],
    period: &str,
    config: &PayrollConfig,
) -> Vec<PayrollResult> {
    employees
        .iter()
        .map(|employee| calculate_payroll_for(Some(employee), attendance, period, config))
        .collect()
}
