//! Calculation logic for the payroll engine.
//!
//! Each component computes one part of the payslip and returns its result
//! with an [`AuditStep`](crate::models::AuditStep): the absence adjustment,
//! overtime, IRG and loan installments. [`calculate_payroll`] runs them in
//! order and assembles the [`PayrollResult`](crate::models::PayrollResult).

mod absence;
mod irg;
mod loans;
mod overtime;
mod payroll;

use rust_decimal::Decimal;

pub use absence::{AbsenceAdjustment, calculate_absence_adjustment};
pub use irg::{IrgBracket, IrgResult, calculate_irg, round_taxable_base};
pub use loans::{LoanDeductionResult, calculate_loan_deductions};
pub use overtime::{OvertimeResult, calculate_overtime};
pub use payroll::{PayrollInput, calculate_payroll, calculate_payroll_batch, calculate_payroll_for};

/// Returns `divisor` when positive, otherwise one.
pub(crate) fn positive_divisor(divisor: Decimal) -> Decimal {
    if divisor > Decimal::ZERO {
        divisor
    } else {
        Decimal::ONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_divisor() {
        assert_eq!(positive_divisor(Decimal::from(30)), Decimal::from(30));
        assert_eq!(positive_divisor(Decimal::ZERO), Decimal::ONE);
        assert_eq!(positive_divisor(Decimal::from(-5)), Decimal::ONE);
    }
}
