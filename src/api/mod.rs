//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for computing payslips, batch
//! payroll and G50 declaration summaries, and for reading the rubrique
//! catalog.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BatchRequest, EmployeeRequest, PayrollRequest, RubriqueRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
