//! Error types for the time clock engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every error condition the engine can report.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the time clock engine.
///
/// Configuration, validation, clock actions, import and export all return
/// this error type. The pure report, schedule and kiosk computations never
/// fail and therefore never produce it.
///
/// # Example
///
/// ```
/// use timeclock_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/kiosk.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/kiosk.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The configured time zone is not a known IANA zone name.
    #[error("Unknown time zone: {name}")]
    InvalidTimeZone {
        /// The zone name as written in the configuration.
        name: String,
    },

    /// No employee exists with the given ID.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The ID that was looked up.
        employee_id: String,
    },

    /// An employee field failed validation.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A calendar date could not be parsed or does not exist locally.
    #[error("Invalid date '{value}': {message}")]
    InvalidDate {
        /// The offending input.
        value: String,
        /// A description of the problem.
        message: String,
    },

    /// A report range whose start date falls after its end date.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// The requested start date.
        start: NaiveDate,
        /// The requested end date.
        end: NaiveDate,
    },

    /// A clock-in was requested while the employee already has an open shift.
    #[error("Employee '{employee_id}' is already clocked in (record '{record_id}')")]
    AlreadyClockedIn {
        /// The employee that attempted to clock in.
        employee_id: String,
        /// The record of the shift that is still open.
        record_id: String,
    },

    /// A clock-out was requested while the employee has no open shift.
    #[error("Employee '{employee_id}' is not clocked in")]
    NotClockedIn {
        /// The employee that attempted to clock out.
        employee_id: String,
    },

    /// A spreadsheet import could not be read.
    #[error("Import failed: {message}")]
    ImportError {
        /// A description of the import failure.
        message: String,
    },

    /// A spreadsheet export could not be written.
    #[error("Export failed: {message}")]
    ExportError {
        /// A description of the export failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
