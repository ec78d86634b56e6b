//! Payroll engine for Algerian SMEs.
//!
//! This crate computes monthly payslips under Algerian rules: absence
//! deductions and presence bonus, overtime (HS50/HS75/HS100), CNAS employee
//! contributions and IRG withholding, loan installments and manual
//! deductions. Every payslip carries an audit trace of the rules applied.
//!
//! The computation is a pure function of its inputs
//! ([`calculation::calculate_payroll`]); configuration is loaded once from
//! YAML ([`config::ConfigLoader`]). The [`declarations`] module aggregates
//! payslips into monthly G50 and annual summaries, and [`api`] exposes
//! everything over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod declarations;
pub mod error;
pub mod models;
