//! HTTP request handlers for the time clock API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{ReportWindow, build_month, build_payroll_report, date_key, derive_all};
use crate::error::EngineError;
use crate::export::{
    CSV_CONTENT_TYPE, PayrollSheet, attendance_csv, employees_csv, parse_employee_import,
    payroll_filename, shifts_csv, summary_csv,
};
use crate::models::{ClockAction, DateKey, PayrollReport};

use super::request::{
    AttendanceQuery, ClockRequest, EmployeeRequest, KioskQuery, ReportQuery, ScheduleRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, ClockResponse, DeleteEmployeeResponse, ImportResponse,
    KioskBoardResponse, ScheduleResponse,
};
use super::state::AppState;

type HandlerResult = Result<Response, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees", get(list_employees_handler).post(create_employee_handler))
        .route("/employees/import", post(import_employees_handler))
        .route("/employees/export.csv", get(export_employees_handler))
        .route(
            "/employees/:id",
            put(update_employee_handler).delete(delete_employee_handler),
        )
        .route("/attendance", get(list_attendance_handler))
        .route("/attendance/export.csv", get(export_attendance_handler))
        .route("/clock", post(clock_handler))
        .route("/kiosk", get(kiosk_handler))
        .route(
            "/schedules/:date",
            get(get_schedule_handler).put(put_schedule_handler),
        )
        .route("/calendar/:year/:month", get(calendar_handler))
        .route("/reports/payroll", get(payroll_report_handler))
        .route("/reports/payroll/summary.csv", get(payroll_summary_csv_handler))
        .route("/reports/payroll/shifts.csv", get(payroll_shifts_csv_handler))
        .with_state(state)
}

/// Handler for GET /employees.
async fn list_employees_handler(State(state): State<AppState>) -> HandlerResult {
    let employees = state.store().employees().await;
    Ok(json_response(StatusCode::OK, employees))
}

/// Handler for POST /employees.
async fn create_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing create employee request");

    let Json(request) = payload.map_err(|r| json_rejection(correlation_id, r))?;
    let new_employee = request
        .validate()
        .map_err(|e| rejected(correlation_id, "Employee validation failed", e))?;

    let employee = state.store().add_employee(new_employee).await;
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee.id,
        "Employee created"
    );
    Ok(json_response(StatusCode::CREATED, employee))
}

/// Handler for PUT /employees/:id.
async fn update_employee_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %employee_id, "Processing update employee request");

    let Json(request) = payload.map_err(|r| json_rejection(correlation_id, r))?;
    let update = request
        .validate()
        .map_err(|e| rejected(correlation_id, "Employee validation failed", e))?;

    let employee = state
        .store()
        .update_employee(&employee_id, update)
        .await
        .map_err(|e| rejected(correlation_id, "Employee update failed", e))?;
    info!(correlation_id = %correlation_id, employee_id = %employee.id, "Employee updated");
    Ok(json_response(StatusCode::OK, employee))
}

/// Handler for DELETE /employees/:id.
///
/// Removes the employee's attendance records and schedule entries as well.
async fn delete_employee_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let deleted = state
        .store()
        .delete_employee(&employee_id)
        .await
        .map_err(|e| rejected(correlation_id, "Employee delete failed", e))?;
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        removed_records = deleted.removed_records,
        "Employee deleted"
    );
    Ok(json_response(
        StatusCode::OK,
        DeleteEmployeeResponse {
            employee: deleted.employee,
            removed_records: deleted.removed_records,
        },
    ))
}

/// Handler for POST /employees/import.
///
/// The body is a CSV file with `name` and `rate` columns.
async fn import_employees_handler(State(state): State<AppState>, body: Bytes) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, bytes = body.len(), "Processing employee import");

    let parsed = parse_employee_import(&body)
        .map_err(|e| rejected(correlation_id, "Employee import rejected", e))?;
    let failures = parsed.failures;
    let employees = state.store().add_employees(parsed.employees).await;

    info!(
        correlation_id = %correlation_id,
        imported = employees.len(),
        failed = failures.len(),
        "Employee import completed"
    );
    Ok(json_response(
        StatusCode::OK,
        ImportResponse {
            imported: employees.len(),
            failed: failures.len(),
            employees,
            failures,
        },
    ))
}

/// Handler for GET /employees/export.csv.
async fn export_employees_handler(State(state): State<AppState>) -> HandlerResult {
    let employees = state.store().employees().await;
    let body = employees_csv(&employees)?;
    let today = date_key(Utc::now(), &state.timezone());
    Ok(csv_response(format!("employee_list_{}.csv", today), body))
}

/// Handler for GET /attendance.
async fn list_attendance_handler(
    State(state): State<AppState>,
    query: Result<Query<AttendanceQuery>, QueryRejection>,
) -> HandlerResult {
    let Query(query) = query.map_err(query_rejection)?;
    let records = state.store().attendance(query.employee_id.as_deref()).await;
    Ok(json_response(StatusCode::OK, records))
}

/// Handler for GET /attendance/export.csv.
async fn export_attendance_handler(State(state): State<AppState>) -> HandlerResult {
    let records = state.store().attendance(None).await;
    let tz = state.timezone();
    let body = attendance_csv(&records, &tz)?;
    let today = date_key(Utc::now(), &tz);
    Ok(csv_response(format!("attendance_{}.csv", today), body))
}

/// Handler for POST /clock.
async fn clock_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|r| json_rejection(correlation_id, r))?;
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        "Processing clock request"
    );

    let transition = state
        .store()
        .clock(&request.employee_id, request.action, &request.photo, Utc::now())
        .await
        .map_err(|e| rejected(correlation_id, "Clock action rejected", e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        record_id = %transition.record().id,
        action = %transition.action(),
        "Clock action applied"
    );
    let status = match transition.action() {
        ClockAction::ClockIn => StatusCode::CREATED,
        ClockAction::ClockOut => StatusCode::OK,
    };
    Ok(json_response(status, ClockResponse::from(transition)))
}

/// Handler for GET /kiosk.
async fn kiosk_handler(
    State(state): State<AppState>,
    query: Result<Query<KioskQuery>, QueryRejection>,
) -> HandlerResult {
    let Query(query) = query.map_err(query_rejection)?;
    let at = query.at.unwrap_or_else(Utc::now);
    let tz = state.timezone();
    let snapshot = state.store().snapshot().await;

    let employees = derive_all(
        &snapshot.employees,
        &snapshot.attendance,
        &snapshot.schedule,
        at,
        &tz,
    );
    Ok(json_response(
        StatusCode::OK,
        KioskBoardResponse {
            at,
            today: date_key(at, &tz),
            employees,
        },
    ))
}

/// Handler for GET /schedules/:date.
async fn get_schedule_handler(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> HandlerResult {
    let date: DateKey = date.parse()?;
    let employee_ids = state.store().scheduled(date).await;
    Ok(json_response(
        StatusCode::OK,
        ScheduleResponse { date, employee_ids },
    ))
}

/// Handler for PUT /schedules/:date.
///
/// An empty `employee_ids` list removes the date from the schedule.
async fn put_schedule_handler(
    State(state): State<AppState>,
    Path(date): Path<String>,
    payload: Result<Json<ScheduleRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let date: DateKey = date
        .parse()
        .map_err(|e| rejected(correlation_id, "Schedule date rejected", e))?;
    let Json(request) = payload.map_err(|r| json_rejection(correlation_id, r))?;

    let employee_ids = state.store().set_scheduled(date, request.employee_ids).await;
    info!(
        correlation_id = %correlation_id,
        date = %date,
        scheduled = employee_ids.len(),
        "Schedule updated"
    );
    Ok(json_response(
        StatusCode::OK,
        ScheduleResponse { date, employee_ids },
    ))
}

/// Handler for GET /calendar/:year/:month.
async fn calendar_handler(
    State(state): State<AppState>,
    path: Result<Path<(i32, u32)>, PathRejection>,
) -> HandlerResult {
    let Path((year, month)) = path.map_err(|r| {
        ApiErrorResponse::bad_request(ApiError::validation_error(r.body_text()))
    })?;
    let snapshot = state.store().snapshot().await;
    let calendar = build_month(
        year,
        month,
        &snapshot.employees,
        &snapshot.attendance,
        &snapshot.schedule,
        &state.timezone(),
    )?;
    Ok(json_response(StatusCode::OK, calendar))
}

/// Handler for GET /reports/payroll.
async fn payroll_report_handler(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(query_rejection)?;
    let report = generate_report(&state, &query, correlation_id).await?;
    Ok(json_response(StatusCode::OK, report))
}

/// Handler for GET /reports/payroll/summary.csv.
async fn payroll_summary_csv_handler(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(query_rejection)?;
    let report = generate_report(&state, &query, correlation_id).await?;
    let body = summary_csv(&report)?;
    Ok(csv_response(
        payroll_filename(query.start, query.end, PayrollSheet::Summary),
        body,
    ))
}

/// Handler for GET /reports/payroll/shifts.csv.
async fn payroll_shifts_csv_handler(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(query_rejection)?;
    let report = generate_report(&state, &query, correlation_id).await?;
    let body = shifts_csv(&report, &state.timezone())?;
    Ok(csv_response(
        payroll_filename(query.start, query.end, PayrollSheet::Shifts),
        body,
    ))
}

/// Builds a payroll report from a fresh store snapshot.
async fn generate_report(
    state: &AppState,
    query: &ReportQuery,
    correlation_id: Uuid,
) -> Result<PayrollReport, ApiErrorResponse> {
    info!(
        correlation_id = %correlation_id,
        start = %query.start,
        end = %query.end,
        "Processing payroll report request"
    );
    let window = ReportWindow::new(query.start, query.end, &state.timezone())
        .map_err(|e| rejected(correlation_id, "Report range rejected", e))?;

    let snapshot = state.store().snapshot().await;
    let start_time = Instant::now();
    let report = build_payroll_report(
        &snapshot.employees,
        &snapshot.attendance,
        &window,
        &state.config().kiosk().currency,
        Utc::now(),
    );
    let duration = start_time.elapsed();

    info!(
        correlation_id = %correlation_id,
        report_id = %report.report_id,
        employees = report.rows.len(),
        shifts = report.totals.shift_count,
        total_pay = %report.totals.total_pay,
        duration_us = duration.as_micros(),
        "Payroll report completed"
    );
    Ok(report)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn csv_response(filename: String, body: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}

/// Logs a failed operation and converts the error.
fn rejected(correlation_id: Uuid, context: &str, error: EngineError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %error, "{}", context);
    error.into()
}

fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
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
    ApiErrorResponse::bad_request(error)
}

fn query_rejection(rejection: QueryRejection) -> ApiErrorResponse {
    warn!(error = %rejection.body_text(), "Query string rejected");
    ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
}
