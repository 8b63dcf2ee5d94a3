//! Clock-in / clock-out planning.
//!
//! Each employee moves through `idle -> active -> idle`: clock-in opens a
//! shift, clock-out closes it. Planning is pure; the store applies the
//! resulting [`ClockTransition`] under its write lock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, AttendanceStatus, ClockAction, Employee};

/// The record change produced by an accepted clock action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum ClockTransition {
    /// A new open shift to insert.
    Opened(AttendanceRecord),
    /// The previously open shift, now clocked out, replacing the stored copy.
    Closed(AttendanceRecord),
}

impl ClockTransition {
    /// The record after the transition.
    pub fn record(&self) -> &AttendanceRecord {
        match self {
            ClockTransition::Opened(record) | ClockTransition::Closed(record) => record,
        }
    }

    /// The action that produced this transition.
    pub fn action(&self) -> ClockAction {
        match self {
            ClockTransition::Opened(_) => ClockAction::ClockIn,
            ClockTransition::Closed(_) => ClockAction::ClockOut,
        }
    }
}

/// Returns the employee's open shift, if any.
pub fn find_open_shift<'a>(
    employee_id: &str,
    records: &'a [AttendanceRecord],
) -> Option<&'a AttendanceRecord> {
    records
        .iter()
        .filter(|r| r.employee_id == employee_id && r.is_open())
        .max_by_key(|r| r.clock_in_time)
}

/// Returns the action the terminal's single button performs for an employee.
///
/// Clock-out if the employee has an open shift, clock-in otherwise.
pub fn next_action(employee_id: &str, records: &[AttendanceRecord]) -> ClockAction {
    match find_open_shift(employee_id, records) {
        Some(_) => ClockAction::ClockOut,
        None => ClockAction::ClockIn,
    }
}

/// Plans a clock action against the current records.
///
/// # Errors
///
/// - [`EngineError::AlreadyClockedIn`] for a clock-in while a shift is open
/// - [`EngineError::NotClockedIn`] for a clock-out with no open shift
///
/// # Example
///
/// ```
/// use timeclock_engine::calculation::{plan_clock_action, ClockTransition};
/// use timeclock_engine::models::{ClockAction, Employee};
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "e1".to_string(),
///     name: "Ivan".to_string(),
///     rate: Decimal::new(300, 0),
/// };
/// let now = Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap();
///
/// let transition = plan_clock_action(&employee, ClockAction::ClockIn, "photo", &[], now).unwrap();
/// assert!(matches!(transition, ClockTransition::Opened(_)));
/// assert!(transition.record().is_open());
/// ```
pub fn plan_clock_action(
    employee: &Employee,
    action: ClockAction,
    photo: &str,
    records: &[AttendanceRecord],
    now: DateTime<Utc>,
) -> EngineResult<ClockTransition> {
    let open = find_open_shift(&employee.id, records);

    match (action, open) {
        (ClockAction::ClockIn, Some(existing)) => Err(EngineError::AlreadyClockedIn {
            employee_id: employee.id.clone(),
            record_id: existing.id.clone(),
        }),
        (ClockAction::ClockIn, None) => Ok(ClockTransition::Opened(AttendanceRecord {
            id: Uuid::new_v4().to_string(),
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            clock_in_time: now,
            clock_in_photo: photo.to_string(),
            clock_out_time: None,
            clock_out_photo: None,
            status: AttendanceStatus::ClockedIn,
        })),
        (ClockAction::ClockOut, Some(existing)) => {
            let mut closed = existing.clone();
            closed.clock_out_time = Some(now);
            closed.clock_out_photo = Some(photo.to_string());
            closed.status = AttendanceStatus::ClockedOut;
            Ok(ClockTransition::Closed(closed))
        }
        (ClockAction::ClockOut, None) => Err(EngineError::NotClockedIn {
            employee_id: employee.id.clone(),
        }),
    }
}
