//! Kiosk board state derivation.
//!
//! This module decides what the terminal shows for each employee: whether they
//! are on shift, expected today, or neither, and how long they have worked
//! today.
//!
//! The board is recomputed from a snapshot on every request. Given the same
//! records, schedule and `now`, the result is always the same.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::models::{AttendanceRecord, Employee, KioskState, KioskStatus, Schedule};

use super::local_date::date_key;
use super::schedule_index::scheduled_on;

/// Derives the kiosk board entry for one employee.
///
/// The state follows a fixed precedence:
///
/// 1. An open shift makes the employee [`KioskState::Active`].
/// 2. Otherwise, being on today's schedule makes them [`KioskState::Scheduled`].
/// 3. Otherwise they are [`KioskState::Idle`].
///
/// "Today" is the local calendar day containing `now` in `tz`.
///
/// # Example
///
/// ```
/// use timeclock_engine::calculation::derive;
/// use timeclock_engine::models::{Employee, KioskState, Schedule};
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "e1".to_string(),
///     name: "Ivan".to_string(),
///     rate: Decimal::new(300, 0),
/// };
/// let now = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
///
/// let status = derive(&employee, &[], &Schedule::new(), now, &Utc);
/// assert_eq!(status.state, KioskState::Idle);
/// assert!(status.minutes_worked_today.is_none());
/// ```
pub fn derive<Tz: TimeZone>(
    employee: &Employee,
    records: &[AttendanceRecord],
    schedule: &Schedule,
    now: DateTime<Utc>,
    tz: &Tz,
) -> KioskStatus {
    let today = date_key(now, tz);
    let own: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|r| r.employee_id == employee.id)
        .collect();

    // Latest clock-in wins if upstream data ever holds two open shifts.
    let open_shift = own
        .iter()
        .filter(|r| r.is_open())
        .max_by_key(|r| r.clock_in_time)
        .map(|r| (*r).clone());

    let last_completed_shift = own
        .iter()
        .filter_map(|r| r.completed_at().map(|out| (out, *r)))
        .max_by_key(|(out, _)| *out)
        .map(|(_, r)| r.clone());

    let (state, minutes_worked_today) = match &open_shift {
        Some(open) => {
            let completed_today = own
                .iter()
                .filter(|r| date_key(r.clock_in_time, tz) == today)
                .filter_map(|r| r.duration())
                .map(|d| d.max(Duration::zero()))
                .fold(Duration::zero(), |acc, d| acc + d);
            let worked = completed_today + open.elapsed(now);
            (KioskState::Active, Some(worked.num_minutes()))
        }
        None if scheduled_on(schedule, now, tz).contains(&employee.id) => {
            (KioskState::Scheduled, None)
        }
        None => (KioskState::Idle, None),
    };

    KioskStatus {
        employee: employee.clone(),
        state,
        open_shift,
        last_completed_shift,
        minutes_worked_today,
    }
}

/// Derives the kiosk board for every employee, in employee-list order.
pub fn derive_all<Tz: TimeZone>(
    employees: &[Employee],
    records: &[AttendanceRecord],
    schedule: &Schedule,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Vec<KioskStatus> {
    employees
        .iter()
        .map(|employee| derive(employee, records, schedule, now, tz))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceStatus, DateKey};
    use chrono::{FixedOffset, NaiveDateTime};
    use rust_decimal::Decimal;

    fn make_utc(s: &str) -> DateTime<Utc> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .unwrap()
            .and_utc()
    }

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn create_employee(id: &str) -> Employee {
        Employee {
            id: id.to_string(),
            name: format!("Employee {}", id),
            rate: Decimal::new(300, 0),
        }
    }

    fn create_shift(id: &str, employee_id: &str, start: &str, end: &str) -> AttendanceRecord {
        AttendanceRecord {
            id: id.to_string(),
            employee_id: employee_id.to_string(),
            employee_name: format!("Employee {}", employee_id),
            clock_in_time: make_utc(start),
            clock_in_photo: String::new(),
            clock_out_time: Some(make_utc(end)),
            clock_out_photo: Some(String::new()),
            status: AttendanceStatus::ClockedOut,
        }
    }

    fn create_open_shift(id: &str, employee_id: &str, start: &str) -> AttendanceRecord {
        AttendanceRecord {
            id: id.to_string(),
            employee_id: employee_id.to_string(),
            employee_name: format!("Employee {}", employee_id),
            clock_in_time: make_utc(start),
            clock_in_photo: String::new(),
            clock_out_time: None,
            clock_out_photo: None,
            status: AttendanceStatus::ClockedIn,
        }
    }

    fn schedule_for(date: &str, ids: &[&str]) -> Schedule {
        let mut schedule = Schedule::new();
        schedule.set(key(date), ids.iter().map(|id| id.to_string()));
        schedule
    }

    #[test]
    fn test_idle_with_no_records_or_schedule() {
        let status = derive(
            &create_employee("e1"),
            &[],
            &Schedule::new(),
            make_utc("2024-03-05 12:00:00"),
            &Utc,
        );

        assert_eq!(status.state, KioskState::Idle);
        assert!(status.open_shift.is_none());
        assert!(status.last_completed_shift.is_none());
        assert!(status.minutes_worked_today.is_none());
    }

    #[test]
    fn test_scheduled_today() {
        let status = derive(
            &create_employee("e1"),
            &[],
            &schedule_for("2024-03-05", &["e1"]),
            make_utc("2024-03-05 12:00:00"),
            &Utc,
        );

        assert_eq!(status.state, KioskState::Scheduled);
        assert!(status.minutes_worked_today.is_none());
    }

    #[test]
    fn test_scheduled_on_other_day_is_idle() {
        let status = derive(
            &create_employee("e1"),
            &[],
            &schedule_for("2024-03-06", &["e1"]),
            make_utc("2024-03-05 12:00:00"),
            &Utc,
        );

        assert_eq!(status.state, KioskState::Idle);
    }

    #[test]
    fn test_active_beats_scheduled() {
        let records = vec![create_open_shift("a1", "e1", "2024-03-05 09:00:00")];
        let status = derive(
            &create_employee("e1"),
            &records,
            &schedule_for("2024-03-05", &["e1"]),
            make_utc("2024-03-05 10:00:00"),
            &Utc,
        );

        assert_eq!(status.state, KioskState::Active);
        assert_eq!(status.open_shift.as_ref().map(|r| r.id.as_str()), Some("a1"));
    }

    #[test]
    fn test_minutes_worked_today_combines_completed_and_open() {
        let records = vec![
            create_shift("a1", "e1", "2024-03-05 08:00:00", "2024-03-05 09:30:00"),
            create_open_shift("a2", "e1", "2024-03-05 10:00:00"),
        ];
        let now = make_utc("2024-03-05 10:45:59");

        let status = derive(&create_employee("e1"), &records, &Schedule::new(), now, &Utc);

        // 90 completed + 45 open (floored)
        assert_eq!(status.minutes_worked_today, Some(135));
    }

    #[test]
    fn test_minutes_worked_today_ignores_yesterday() {
        let records = vec![
            create_shift("a1", "e1", "2024-03-04 08:00:00", "2024-03-04 16:00:00"),
            create_open_shift("a2", "e1", "2024-03-05 10:00:00"),
        ];
        let now = make_utc("2024-03-05 10:30:00");

        let status = derive(&create_employee("e1"), &records, &Schedule::new(), now, &Utc);

        assert_eq!(status.minutes_worked_today, Some(30));
    }

    #[test]
    fn test_minutes_worked_today_uses_local_day() {
        // UTC+3: a shift clocked in at 22:00 UTC on 03-04 is 01:00 local on 03-05.
        let tz = FixedOffset::east_opt(3 * 3600).unwrap();
        let records = vec![
            create_shift("a1", "e1", "2024-03-04 22:00:00", "2024-03-04 23:00:00"),
            create_open_shift("a2", "e1", "2024-03-05 06:00:00"),
        ];
        let now = make_utc("2024-03-05 06:10:00");

        let status = derive(&create_employee("e1"), &records, &Schedule::new(), now, &tz);

        assert_eq!(status.minutes_worked_today, Some(70));
    }

    #[test]
    fn test_last_completed_shift_is_latest_clock_out() {
        let records = vec![
            create_shift("a1", "e1", "2024-03-05 08:00:00", "2024-03-05 09:00:00"),
            create_shift("a2", "e1", "2024-03-03 08:00:00", "2024-03-03 18:00:00"),
            create_shift("a3", "e1", "2024-03-04 08:00:00", "2024-03-04 09:00:00"),
        ];

        let status = derive(
            &create_employee("e1"),
            &records,
            &Schedule::new(),
            make_utc("2024-03-05 12:00:00"),
            &Utc,
        );

        assert_eq!(
            status.last_completed_shift.map(|r| r.id),
            Some("a1".to_string())
        );
    }

    #[test]
    fn test_other_employees_records_are_ignored() {
        let records = vec![create_open_shift("a1", "e2", "2024-03-05 09:00:00")];

        let status = derive(
            &create_employee("e1"),
            &records,
            &Schedule::new(),
            make_utc("2024-03-05 12:00:00"),
            &Utc,
        );

        assert_eq!(status.state, KioskState::Idle);
    }

    #[test]
    fn test_derive_all_keeps_employee_order() {
        let employees = vec![create_employee("e2"), create_employee("e1")];
        let records = vec![create_open_shift("a1", "e1", "2024-03-05 09:00:00")];

        let board = derive_all(
            &employees,
            &records,
            &schedule_for("2024-03-05", &["e2"]),
            make_utc("2024-03-05 12:00:00"),
            &Utc,
        );

        assert_eq!(board.len(), 2);
        assert_eq!(board[0].employee.id, "e2");
        assert_eq!(board[0].state, KioskState::Scheduled);
        assert_eq!(board[1].employee.id, "e1");
        assert_eq!(board[1].state, KioskState::Active);
    }
}
