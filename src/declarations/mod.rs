//! Statutory declaration aggregators.
//!
//! These consume [`PayrollResult`](crate::models::PayrollResult)s produced
//! by the engine: the monthly G50 summary and the annual per-employee
//! summary.

mod annual;
mod g50;

pub use annual::{AnnualEmployeeTotals, AnnualSummary, summarize_annual};
pub use g50::{G50Summary, estimate_g50_irg, summarize_g50};
