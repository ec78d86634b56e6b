//! Loan installment deductions.
//!
//! Approved loans are repaid by a flat monthly installment withheld from
//! the net. There is no interest or balance tracking: the installment is
//! withheld every month until HR marks the loan repaid.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, Loan};

/// The result of summing loan installments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanDeductionResult {
    /// Sum of approved installments.
    pub total: Decimal,
    /// Number of approved loans.
    pub active_loans: usize,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Sums the monthly installments of approved loans.
///
/// # Examples
///
/// ```
/// use paie_engine::calculation::calculate_loan_deductions;
/// use paie_engine::models::{Loan, LoanStatus};
/// use rust_decimal::Decimal;
///
/// let loans = vec![
///     Loan {
///         id: "l1".to_string(),
///         amount: Decimal::from(30000),
///         monthly_payment: Decimal::from(3000),
///         status: LoanStatus::Approved,
///         reason: String::new(),
///         date: None,
///     },
///     Loan {
///         id: "l2".to_string(),
///         amount: Decimal::from(10000),
///         monthly_payment: Decimal::from(1000),
///         status: LoanStatus::Pending,
///         reason: String::new(),
///         date: None,
///     },
/// ];
///
/// let result = calculate_loan_deductions(&loans, 1);
/// assert_eq!(result.total, Decimal::from(3000));
/// assert_eq!(result.active_loans, 1);
/// ```
pub fn calculate_loan_deductions(loans: &[Loan], step_number: u32) -> LoanDeductionResult {
    let active: Vec<&Loan> = loans.iter().filter(|l| l.is_active()).collect();
    let total: Decimal = active.iter().map(|l| l.monthly_payment).sum();

    let audit_step = AuditStep {
        step_number,
        rule_id: "loan_installments".to_string(),
        rule_name: "Loan Installments".to_string(),
        input: serde_json::json!({
            "loans": loans.len(),
            "approved": active.iter().map(|l| l.id.clone()).collect::<Vec<_>>()
        }),
        output: serde_json::json!({
            "total": total.normalize().to_string()
        }),
        reasoning: format!(
            "{} approved loan(s) of {}: {} withheld",
            active.len(),
            loans.len(),
            total.normalize()
        ),
    };

    LoanDeductionResult {
        total,
        active_loans: active.len(),
        audit_step,
    }
}
