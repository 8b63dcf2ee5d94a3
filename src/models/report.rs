//! Payroll report models.
//!
//! This module contains the [`PayrollReport`] envelope returned for a report
//! request and the per-employee [`ReportRow`]s and [`ReportShift`]s inside it.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AttendanceRecord, Employee};

/// A completed shift included in a report row.
///
/// # Example
///
/// ```
/// use timeclock_engine::models::ReportShift;
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let shift = ReportShift {
///     record_id: "att_001".to_string(),
///     clock_in_time: Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap(),
///     clock_out_time: Utc.with_ymd_and_hms(2024, 3, 5, 11, 0, 0).unwrap(),
///     hours: Decimal::new(2, 0),
///     clock_in_photo: "data:image/png;base64,AAAA".to_string(),
///     clock_out_photo: None,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportShift {
    /// The attendance record this shift came from.
    pub record_id: String,
    /// When the shift started.
    pub clock_in_time: DateTime<Utc>,
    /// When the shift ended.
    pub clock_out_time: DateTime<Utc>,
    /// Shift length in fractional hours.
    pub hours: Decimal,
    /// Photo payload captured at clock-in.
    pub clock_in_photo: String,
    /// Photo payload captured at clock-out.
    pub clock_out_photo: Option<String>,
}

impl ReportShift {
    /// Builds a report shift from a completed record.
    ///
    /// Returns `None` if the record is still open or has no clock-out time.
    pub fn from_record(record: &AttendanceRecord) -> Option<Self> {
        let clock_out_time = record.completed_at()?;
        let hours = record.worked_hours()?;
        Some(Self {
            record_id: record.id.clone(),
            clock_in_time: record.clock_in_time,
            clock_out_time,
            hours,
            clock_in_photo: record.clock_in_photo.clone(),
            clock_out_photo: record.clock_out_photo.clone(),
        })
    }
}

/// One employee's hours and pay over a report range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// The employee this row aggregates.
    pub employee: Employee,
    /// Sum of completed shift hours inside the range.
    pub total_hours: Decimal,
    /// `total_hours * employee.rate`, unrounded.
    pub total_pay: Decimal,
    /// Completed shifts inside the range, earliest clock-in first.
    pub shifts: Vec<ReportShift>,
}

/// Grand totals across all rows of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    /// Sum of every row's hours.
    pub total_hours: Decimal,
    /// Sum of every row's pay.
    pub total_pay: Decimal,
    /// Number of shifts across all rows.
    pub shift_count: usize,
}

impl ReportTotals {
    /// Sums the given rows, saturating at `Decimal::MAX`.
    pub fn from_rows(rows: &[ReportRow]) -> Self {
        Self {
            total_hours: rows
                .iter()
                .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.total_hours)),
            total_pay: rows
                .iter()
                .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.total_pay)),
            shift_count: rows.iter().map(|r| r.shifts.len()).sum(),
        }
    }
}

/// The complete result of a payroll report request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollReport {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that produced the report.
    pub engine_version: String,
    /// First local calendar date of the range (inclusive).
    pub start_date: NaiveDate,
    /// Last local calendar date of the range (inclusive).
    pub end_date: NaiveDate,
    /// Currency code the rates and pay are expressed in.
    pub currency: String,
    /// One row per employee, in employee-list order.
    pub rows: Vec<ReportRow>,
    /// Grand totals.
    pub totals: ReportTotals,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttendanceStatus;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_row(hours: &str, pay: &str, shift_count: usize) -> ReportRow {
        let shift = ReportShift {
            record_id: "att".to_string(),
            clock_in_time: Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap(),
            clock_out_time: Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap(),
            hours: dec("1"),
            clock_in_photo: String::new(),
            clock_out_photo: None,
        };
        ReportRow {
            employee: Employee {
                id: "emp_001".to_string(),
                name: "Ivan".to_string(),
                rate: dec("300"),
            },
            total_hours: dec(hours),
            total_pay: dec(pay),
            shifts: vec![shift; shift_count],
        }
    }

    #[test]
    fn test_totals_sum_rows() {
        let rows = vec![create_row("3.5", "1050", 2), create_row("1.25", "500", 1)];
        let totals = ReportTotals::from_rows(&rows);

        assert_eq!(totals.total_hours, dec("4.75"));
        assert_eq!(totals.total_pay, dec("1550"));
        assert_eq!(totals.shift_count, 3);
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let mut big = create_row("1", "0", 1);
        big.total_pay = Decimal::MAX;
        let totals = ReportTotals::from_rows(&[big.clone(), big]);

        assert_eq!(totals.total_pay, Decimal::MAX);
        assert_eq!(totals.total_hours, dec("2"));
    }

    #[test]
    fn test_totals_of_no_rows_are_zero() {
        let totals = ReportTotals::from_rows(&[]);
        assert_eq!(totals.total_hours, Decimal::ZERO);
        assert_eq!(totals.total_pay, Decimal::ZERO);
        assert_eq!(totals.shift_count, 0);
    }

    #[test]
    fn test_report_shift_from_open_record_is_none() {
        let record = AttendanceRecord {
            id: "att_001".to_string(),
            employee_id: "emp_001".to_string(),
            employee_name: "Ivan".to_string(),
            clock_in_time: Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap(),
            clock_in_photo: "in".to_string(),
            clock_out_time: None,
            clock_out_photo: None,
            status: AttendanceStatus::ClockedIn,
        };
        assert!(ReportShift::from_record(&record).is_none());
    }

    #[test]
    fn test_report_shift_copies_photos_and_hours() {
        let record = AttendanceRecord {
            id: "att_002".to_string(),
            employee_id: "emp_001".to_string(),
            employee_name: "Ivan".to_string(),
            clock_in_time: Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap(),
            clock_in_photo: "in".to_string(),
            clock_out_time: Some(Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap()),
            clock_out_photo: Some("out".to_string()),
            status: AttendanceStatus::ClockedOut,
        };

        let shift = ReportShift::from_record(&record).unwrap();
        assert_eq!(shift.record_id, "att_002");
        assert_eq!(shift.hours, dec("1.5"));
        assert_eq!(shift.clock_in_photo, "in");
        assert_eq!(shift.clock_out_photo.as_deref(), Some("out"));
    }
}
