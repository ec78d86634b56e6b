//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_payroll_batch, calculate_payroll_for};
use crate::declarations::summarize_g50;
use crate::error::EngineResult;
use crate::models::{AttendanceRecord, Employee, PayPeriod};

use super::request::{BatchRequest, PayrollRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/calculate", post(calculate_handler))
        .route("/payroll/batch", post(batch_handler))
        .route("/declarations/g50", post(g50_handler))
        .route("/rubriques", get(rubriques_handler))
        .with_state(state)
}

/// Handler for POST /payroll/calculate.
///
/// Computes one employee's payslip for the requested period.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, &correlation_id),
    };

    let config = state.config();
    let resolved = PayPeriod::parse(&request.period)
        .and_then(|_| request.employee
            .into_employee(config.catalog(), &config.statutory().overtime));
    let employee = match resolved {
        Ok(employee) => employee,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid payroll request");
            return error_response(err.into());
        }
    };

    let start_time = Instant::now();
    let result = calculate_payroll_for(
        Some(&employee),
        &request.attendance,
        &request.period,
        config.config(),
    );
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee.id,
        period = %request.period,
        net = %result.net,
        duration_us = start_time.elapsed().as_micros(),
        "Payroll computed"
    );

    json_response(result)
}

/// Handler for POST /payroll/batch.
///
/// Computes payslips for every employee in the request, in request order.
async fn batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing batch payroll request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, &correlation_id),
    };

    let (employees, attendance, period) = match resolve_batch(request, &state) {
        Ok(resolved) => resolved,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid batch request");
            return error_response(err.into());
        }
    };

    let start_time = Instant::now();
    let results = calculate_payroll_batch(&employees, &attendance, &period, state.config().config());
    info!(
        correlation_id = %correlation_id,
        period = %period,
        employees = results.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Batch payroll computed"
    );

    json_response(results)
}

/// Handler for POST /declarations/g50.
///
/// Computes the month's payslips and aggregates them into a G50 summary.
async fn g50_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing G50 declaration request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, &correlation_id),
    };

    let (employees, attendance, period) = match resolve_batch(request, &state) {
        Ok(resolved) => resolved,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid G50 request");
            return error_response(err.into());
        }
    };

    let config = state.config();
    let results = calculate_payroll_batch(&employees, &attendance, &period, config.config());
    let summary = summarize_g50(&period, &employees, &results, &config.statutory().g50);

    if summary.irg_difference != Decimal::ZERO {
        warn!(
            correlation_id = %correlation_id,
            irg_engine = %summary.irg_engine,
            irg_estimate = %summary.irg_estimate,
            "G50 IRG estimate differs from payslip total"
        );
    }
    info!(
        correlation_id = %correlation_id,
        period = %period,
        employees = summary.employee_count,
        "G50 summary computed"
    );

    json_response(summary)
}

/// Handler for GET /rubriques.
async fn rubriques_handler(State(state): State<AppState>) -> Response {
    json_response(state.config().catalog())
}

/// Validates the period and resolves every employee against the catalog.
fn resolve_batch(
    request: BatchRequest,
    state: &AppState,
) -> EngineResult<(Vec<Employee>, Vec<AttendanceRecord>, String)> {
    PayPeriod::parse(&request.period)?;
    let config = state.config();
    let employees = request
        .employees
        .into_iter()
        .map(|e| e.into_employee(config.catalog(), &config.statutory().overtime))
        .collect::<EngineResult<Vec<_>>>()?;
    Ok((employees, request.attendance, request.period))
}

fn json_response<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: &Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    error_response(ApiErrorResponse::bad_request(error))
}
