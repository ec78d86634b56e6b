//! Employee loan model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a loan. Only approved loans are deducted from pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    /// Requested, awaiting a decision.
    #[serde(alias = "Pending")]
    Pending,
    /// Approved and being repaid through payroll.
    #[serde(alias = "Approved")]
    Approved,
    /// Refused.
    #[serde(alias = "Rejected")]
    Rejected,
    /// Fully repaid, no longer deducted.
    #[serde(alias = "Repaid")]
    Repaid,
}

/// A loan granted to an employee and repaid by a flat monthly installment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    /// Loan identifier.
    #[serde(default)]
    pub id: String,
    /// Principal lent.
    #[serde(default)]
    pub amount: Decimal,
    /// Installment withheld each month while approved.
    #[serde(default)]
    pub monthly_payment: Decimal,
    /// Current status.
    pub status: LoanStatus,
    /// Free-text reason.
    #[serde(default)]
    pub reason: String,
    /// Date granted.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl Loan {
    /// True when the installment is withheld this month.
    pub fn is_active(&self) -> bool {
        self.status == LoanStatus::Approved
    }

    /// Number of monthly installments needed to repay the principal.
    ///
    /// Display-only: the engine deducts the installment until HR marks the
    /// loan repaid, regardless of this count.
    ///
    /// # Examples
    ///
    /// ```
    /// use paie_engine::models::{Loan, LoanStatus};
    /// use rust_decimal::Decimal;
    ///
    /// let loan = Loan {
    ///     id: "loan_1".to_string(),
    ///     amount: Decimal::new(10000, 0),
    ///     monthly_payment: Decimal::new(3000, 0),
    ///     status: LoanStatus::Approved,
    ///     reason: String::new(),
    ///     date: None,
    /// };
    /// assert_eq!(loan.installment_count(), 4);
    /// ```
    pub fn installment_count(&self) -> u32 {
        if self.monthly_payment <= Decimal::ZERO || self.amount <= Decimal::ZERO {
            return 0;
        }
        let count = (self.amount / self.monthly_payment).ceil();
        count.to_u32().unwrap_or(u32::MAX)
    }
}
