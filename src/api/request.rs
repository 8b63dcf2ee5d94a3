//! Request types for the time clock API.
//!
//! This module defines the JSON bodies and query strings the handlers accept.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{parse_rate, validate_name, validate_rate};
use crate::error::EngineResult;
use crate::models::{ClockAction, NewEmployee};

/// An hourly rate as sent by a client: free text from a form field or a
/// JSON number.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RateInput {
    /// Form text such as `" 350.5 "`.
    Text(String),
    /// A JSON number.
    Number(Decimal),
}

impl RateInput {
    /// Parses and checks the rate.
    pub fn validate(&self) -> EngineResult<Decimal> {
        match self {
            RateInput::Text(text) => parse_rate(text),
            RateInput::Number(value) => validate_rate(*value),
        }
    }
}

/// Request body for creating or updating an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Display name; surrounding whitespace is trimmed.
    pub name: String,
    /// Hourly rate.
    pub rate: RateInput,
}

impl EmployeeRequest {
    /// Validates the request into a [`NewEmployee`].
    pub fn validate(&self) -> EngineResult<NewEmployee> {
        Ok(NewEmployee {
            name: validate_name(&self.name)?,
            rate: self.rate.validate()?,
        })
    }
}

/// Request body for `POST /clock`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockRequest {
    /// The employee pressing the button.
    pub employee_id: String,
    /// Defaults to the terminal's single-button action.
    #[serde(default)]
    pub action: Option<ClockAction>,
    /// Opaque photo payload captured by the terminal camera.
    pub photo: String,
}

/// Request body for `PUT /schedules/:date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// IDs to schedule. An empty list clears the day.
    pub employee_ids: Vec<String>,
}

/// Query string for `GET /attendance`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendanceQuery {
    /// Only return this employee's records.
    #[serde(default)]
    pub employee_id: Option<String>,
}

/// Query string for `GET /kiosk`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KioskQuery {
    /// Derive the board as of this instant instead of now.
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,
}

/// Query string for the payroll report endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportQuery {
    /// First local calendar date (inclusive).
    pub start: NaiveDate,
    /// Last local calendar date (inclusive).
    pub end: NaiveDate,
}
