//! Payroll report aggregation.
//!
//! This module groups completed shifts by employee over a local date range and
//! derives hours and pay from each employee's hourly rate.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, Employee, PayrollReport, ReportRow, ReportShift, ReportTotals,
};

use super::local_date::{end_of_day, start_of_day};

/// The instants bounding a report over two inclusive local calendar dates.
///
/// # Example
///
/// ```
/// use timeclock_engine::calculation::ReportWindow;
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// let window = ReportWindow::new(
///     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
///     &Utc,
/// )
/// .unwrap();
/// assert_eq!(window.starts_at, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    /// First local calendar date (inclusive).
    pub start_date: NaiveDate,
    /// Last local calendar date (inclusive).
    pub end_date: NaiveDate,
    /// Local start of `start_date`.
    pub starts_at: DateTime<Utc>,
    /// Local end of `end_date` (last millisecond).
    pub ends_at: DateTime<Utc>,
}

impl ReportWindow {
    /// Resolves two local calendar dates into a report window.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidDateRange`] if `start_date` is after `end_date`
    /// - [`EngineError::InvalidDate`] if a day boundary cannot be resolved
    pub fn new<Tz: TimeZone>(
        start_date: NaiveDate,
        end_date: NaiveDate,
        tz: &Tz,
    ) -> EngineResult<Self> {
        if start_date > end_date {
            return Err(EngineError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }

        Ok(Self {
            start_date,
            end_date,
            starts_at: start_of_day(start_date, tz)?,
            ends_at: end_of_day(end_date, tz)?,
        })
    }

    /// Returns true if a record counts toward a report over this window.
    ///
    /// The record must be clocked out, clocked in no earlier than the start of
    /// the window and clocked out no later than its end. Open shifts never
    /// count, and neither do clocked-out records missing a clock-out time.
    pub fn includes(&self, record: &AttendanceRecord) -> bool {
        match record.completed_at() {
            Some(clock_out) => record.clock_in_time >= self.starts_at && clock_out <= self.ends_at,
            None => false,
        }
    }
}

/// Computes one report row per employee over a window.
///
/// Rows come back in the order of `employees`. Employees with no matching
/// shifts still get a row with zero hours and zero pay. Pay is
/// `total_hours * rate` without any rounding; rounding is left to
/// presentation.
///
/// # Example
///
/// ```
/// use timeclock_engine::calculation::{compute_report, ReportWindow};
/// use timeclock_engine::models::{AttendanceRecord, AttendanceStatus, Employee};
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "e1".to_string(),
///     name: "Ivan".to_string(),
///     rate: Decimal::new(300, 0),
/// };
/// let record = AttendanceRecord {
///     id: "a1".to_string(),
///     employee_id: "e1".to_string(),
///     employee_name: "Ivan".to_string(),
///     clock_in_time: Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap(),
///     clock_in_photo: String::new(),
///     clock_out_time: Some(Utc.with_ymd_and_hms(2024, 3, 5, 11, 0, 0).unwrap()),
///     clock_out_photo: None,
///     status: AttendanceStatus::ClockedOut,
/// };
/// let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// let window = ReportWindow::new(day, day, &Utc).unwrap();
///
/// let rows = compute_report(&[employee], &[record], &window);
/// assert_eq!(rows[0].total_hours, Decimal::new(2, 0));
/// assert_eq!(rows[0].total_pay, Decimal::new(600, 0));
/// ```
pub fn compute_report(
    employees: &[Employee],
    records: &[AttendanceRecord],
    window: &ReportWindow,
) -> Vec<ReportRow> {
    employees
        .iter()
        .map(|employee| compute_row(employee, records, window))
        .collect()
}

fn compute_row(
    employee: &Employee,
    records: &[AttendanceRecord],
    window: &ReportWindow,
) -> ReportRow {
    let mut shifts: Vec<ReportShift> = records
        .iter()
        .filter(|r| r.employee_id == employee.id && window.includes(r))
        .filter_map(ReportShift::from_record)
        .collect();
    shifts.sort_by_key(|s| s.clock_in_time);

    // Saturates rather than panics on out-of-range stored data.
    let total_hours = shifts
        .iter()
        .fold(Decimal::ZERO, |acc, s| acc.saturating_add(s.hours));

    ReportRow {
        employee: employee.clone(),
        total_hours,
        total_pay: total_hours.saturating_mul(employee.rate),
        shifts,
    }
}

/// Computes a report and wraps it with an ID, timestamp, currency and grand
/// totals.
pub fn build_payroll_report(
    employees: &[Employee],
    records: &[AttendanceRecord],
    window: &ReportWindow,
    currency: &str,
    generated_at: DateTime<Utc>,
) -> PayrollReport {
    let rows = compute_report(employees, records, window);
    let totals = ReportTotals::from_rows(&rows);

    PayrollReport {
        report_id: Uuid::new_v4(),
        generated_at,
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        start_date: window.start_date,
        end_date: window.end_date,
        currency: currency.to_string(),
        rows,
        totals,
    }
}
