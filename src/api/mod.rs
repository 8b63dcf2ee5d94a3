//! HTTP API module for the time clock kiosk.
//!
//! This module provides the REST API endpoints for employee management,
//! clocking in and out, the kiosk board, schedules, the attendance calendar
//! and payroll reports.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ClockRequest, EmployeeRequest, RateInput, ReportQuery, ScheduleRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
