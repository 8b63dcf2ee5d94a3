//! Response types for the time clock API.
//!
//! This module defines the response bodies returned by the handlers and the
//! error response structures with their mapping from [`EngineError`].

use std::collections::BTreeSet;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculation::ClockTransition;
use crate::error::EngineError;
use crate::export::ImportRowError;
use crate::models::{AttendanceRecord, ClockAction, DateKey, Employee, KioskStatus};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidTimeZone { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::EmployeeNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("EMPLOYEE_NOT_FOUND", message),
            },
            EngineError::InvalidEmployee { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_EMPLOYEE",
                    message,
                    "The employee data contains invalid information",
                ),
            },
            EngineError::InvalidDate { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_DATE",
                    message,
                    "Dates must be written as YYYY-MM-DD",
                ),
            },
            EngineError::InvalidDateRange { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_DATE_RANGE", message),
            },
            EngineError::AlreadyClockedIn { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("ALREADY_CLOCKED_IN", message),
            },
            EngineError::NotClockedIn { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("NOT_CLOCKED_IN", message),
            },
            EngineError::ImportError { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("IMPORT_ERROR", message),
            },
            EngineError::ExportError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("EXPORT_ERROR", "Export failed", message),
            },
        }
    }
}

/// Body returned by `POST /clock`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockResponse {
    /// The action that was applied.
    pub action: ClockAction,
    /// The opened or closed record.
    pub record: AttendanceRecord,
}

impl From<ClockTransition> for ClockResponse {
    fn from(transition: ClockTransition) -> Self {
        let action = transition.action();
        let record = match transition {
            ClockTransition::Opened(record) | ClockTransition::Closed(record) => record,
        };
        Self { action, record }
    }
}

/// Body returned by `GET /kiosk`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KioskBoardResponse {
    /// The instant the board was derived for.
    pub at: DateTime<Utc>,
    /// The local calendar day `at` falls on.
    pub today: DateKey,
    /// One entry per employee, in employee-list order.
    pub employees: Vec<KioskStatus>,
}

/// Body returned by the schedule endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    /// The local day.
    pub date: DateKey,
    /// Scheduled employee IDs, sorted.
    pub employee_ids: BTreeSet<String>,
}

/// Body returned by `DELETE /employees/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteEmployeeResponse {
    /// The removed employee.
    pub employee: Employee,
    /// Number of attendance records removed with it.
    pub removed_records: usize,
}

/// Body returned by `POST /employees/import`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    /// Number of employees added.
    pub imported: usize,
    /// Number of rows skipped.
    pub failed: usize,
    /// The created employees with their new IDs.
    pub employees: Vec<Employee>,
    /// Rows that could not be imported.
    pub failures: Vec<ImportRowError>,
}
