//! Attendance record model.
//!
//! This module defines [`AttendanceRecord`], one clock-in/clock-out pair for an
//! employee, and the [`AttendanceStatus`] that tells open and completed shifts
//! apart.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Milliseconds in one hour, the divisor for fractional hour counts.
pub const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Whether a shift is still open or has been completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    /// The employee clocked in and has not clocked out yet.
    ClockedIn,
    /// The shift has both a clock-in and a clock-out.
    ClockedOut,
}

impl AttendanceStatus {
    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::ClockedIn => "clocked-in",
            AttendanceStatus::ClockedOut => "clocked-out",
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One shift for one employee.
///
/// A record is created on clock-in with status [`AttendanceStatus::ClockedIn`]
/// and updated in place on clock-out. The employee name is a snapshot taken at
/// clock-in and is not updated when the employee is renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier for the record.
    pub id: String,
    /// The employee this shift belongs to.
    pub employee_id: String,
    /// The employee's name at clock-in time.
    pub employee_name: String,
    /// When the shift started.
    pub clock_in_time: DateTime<Utc>,
    /// Opaque image payload captured at clock-in (usually a data URI).
    pub clock_in_photo: String,
    /// When the shift ended, if it has.
    #[serde(default)]
    pub clock_out_time: Option<DateTime<Utc>>,
    /// Opaque image payload captured at clock-out.
    #[serde(default)]
    pub clock_out_photo: Option<String>,
    /// Open or completed.
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    /// Returns true while the shift has not been clocked out.
    pub fn is_open(&self) -> bool {
        self.status == AttendanceStatus::ClockedIn
    }

    /// Returns the clock-out time of a completed shift.
    ///
    /// `None` for open shifts and for clocked-out records that are missing
    /// their clock-out time.
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        match self.status {
            AttendanceStatus::ClockedOut => self.clock_out_time,
            AttendanceStatus::ClockedIn => None,
        }
    }

    /// Returns the length of a completed shift.
    pub fn duration(&self) -> Option<Duration> {
        self.completed_at().map(|out| out - self.clock_in_time)
    }

    /// Returns the length of a completed shift in fractional hours.
    ///
    /// # Examples
    ///
    /// ```
    /// use timeclock_engine::models::{AttendanceRecord, AttendanceStatus};
    /// use chrono::{TimeZone, Utc};
    /// use rust_decimal::Decimal;
    ///
    /// let record = AttendanceRecord {
    ///     id: "att_001".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     employee_name: "Ivan".to_string(),
    ///     clock_in_time: Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap(),
    ///     clock_in_photo: "data:image/png;base64,AAAA".to_string(),
    ///     clock_out_time: Some(Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap()),
    ///     clock_out_photo: Some("data:image/png;base64,BBBB".to_string()),
    ///     status: AttendanceStatus::ClockedOut,
    /// };
    /// assert_eq!(record.worked_hours(), Some(Decimal::new(15, 1)));
    /// ```
    pub fn worked_hours(&self) -> Option<Decimal> {
        self.duration().map(duration_to_hours)
    }

    /// Returns how long an open shift has been running at `now`.
    ///
    /// Negative elapsed time (a clock-in recorded in the future) is reported
    /// as zero.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        (now - self.clock_in_time).max(Duration::zero())
    }
}

/// Converts a duration into fractional hours (milliseconds / 3,600,000).
pub fn duration_to_hours(duration: Duration) -> Decimal {
    Decimal::from(duration.num_milliseconds()) / Decimal::from(MILLIS_PER_HOUR)
}
