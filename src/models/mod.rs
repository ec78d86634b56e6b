//! Core data models for the payroll engine.
//!
//! This module contains all the domain models read or produced by the engine.

mod attendance;
mod employee;
mod loan;
mod pay_period;
mod payroll_result;
mod rubrique;

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use employee::Employee;
pub use loan::{Loan, LoanStatus};
pub use pay_period::PayPeriod;
pub use payroll_result::{AuditStep, AuditTrace, AuditWarning, OvertimeLine, PayrollResult};
pub use rubrique::{Rubrique, RubriqueType};
