//! Absence deduction and presence-bonus forfeiture.
//!
//! Each `Absent` day is deducted from the base salary at the daily rate
//! (`base_salary / working_days_count`). Any absence or late arrival in the
//! month forfeits the whole presence bonus; there is no partial bonus.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceRecord, AttendanceStatus, AuditStep, Employee};

use super::positive_divisor;

/// The result of applying a month's attendance to the base salary and bonus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceAdjustment {
    /// Number of `Absent` records.
    pub absent_days: u32,
    /// Number of `Late` records.
    pub late_days: u32,
    /// base_salary / working_days_count.
    pub daily_rate: Decimal,
    /// absent_days × daily_rate.
    pub deduction: Decimal,
    /// Base salary after the deduction, clamped at zero.
    pub adjusted_base_salary: Decimal,
    /// Whether the presence bonus is forfeited.
    pub has_penalty: bool,
    /// Presence bonus paid.
    pub real_bonus: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the absence deduction and presence bonus for one employee.
///
/// `records` must already be restricted to the employee and month being
/// paid; [`PayrollInput`](super::PayrollInput) does that filtering.
///
/// # Examples
///
/// ```
/// use paie_engine::calculation::calculate_absence_adjustment;
/// use paie_engine::models::{AttendanceRecord, AttendanceStatus, Employee};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     base_salary: Decimal::new(30000, 0),
///     presence_bonus: Decimal::new(2000, 0),
///     ..Employee::default()
/// };
/// let records = vec![AttendanceRecord {
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
///     status: AttendanceStatus::Late,
/// }];
///
/// let result = calculate_absence_adjustment(&employee, &records, 30, 1);
/// assert_eq!(result.deduction, Decimal::ZERO);
/// assert!(result.has_penalty);
/// assert_eq!(result.real_bonus, Decimal::ZERO);
/// ```
pub fn calculate_absence_adjustment(
    employee: &Employee,
    records: &[AttendanceRecord],
    working_days_count: u32,
    step_number: u32,
) -> AbsenceAdjustment {
    let absent_days = count_status(records, AttendanceStatus::Absent);
    let late_days = count_status(records, AttendanceStatus::Late);

    let divisor = positive_divisor(Decimal::from(working_days_count));
    let daily_rate = employee.base_salary / divisor;
    let deduction = Decimal::from(absent_days) * daily_rate;
    let adjusted_base_salary = (employee.base_salary - deduction).max(Decimal::ZERO);

    let has_penalty = records.iter().any(AttendanceRecord::is_penalizing);
    let real_bonus = if has_penalty {
        Decimal::ZERO
    } else {
        employee.presence_bonus
    };

    let reasoning = match (absent_days, late_days) {
        (0, 0) => format!(
            "No absence or late arrival: full base salary and presence bonus of {}",
            real_bonus.normalize()
        ),
        (0, late) => format!(
            "{} late arrival(s): presence bonus forfeited, no salary deduction",
            late
        ),
        (absent, late) => format!(
            "{} absent day(s) × {} = {} deducted; {} late arrival(s); presence bonus forfeited",
            absent,
            daily_rate.round_dp(2).normalize(),
            deduction.round_dp(2).normalize(),
            late
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "absence_adjustment".to_string(),
        rule_name: "Absence Adjustment".to_string(),
        input: serde_json::json!({
            "base_salary": employee.base_salary.normalize().to_string(),
            "presence_bonus": employee.presence_bonus.normalize().to_string(),
            "working_days_count": divisor.normalize().to_string(),
            "records": records.len(),
            "absent_days": absent_days,
            "late_days": late_days
        }),
        output: serde_json::json!({
            "daily_rate": daily_rate.normalize().to_string(),
            "deduction": deduction.normalize().to_string(),
            "adjusted_base_salary": adjusted_base_salary.normalize().to_string(),
            "has_penalty": has_penalty,
            "real_bonus": real_bonus.normalize().to_string()
        }),
        reasoning,
    };

    AbsenceAdjustment {
        absent_days,
        late_days,
        daily_rate,
        deduction,
        adjusted_base_salary,
        has_penalty,
        real_bonus,
        audit_step,
    }
}

fn count_status(records: &[AttendanceRecord], status: AttendanceStatus) -> u32 {
    records.iter().filter(|r| r.status == status).count() as u32
}
