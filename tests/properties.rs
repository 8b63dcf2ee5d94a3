//! Property tests for report aggregation, the schedule index and the kiosk
//! board.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Europe::Moscow;
use proptest::prelude::*;
use rust_decimal::Decimal;

use timeclock_engine::calculation::{
    ReportWindow, compute_report, derive, get_scheduled, remove_employee, set_scheduled,
};
use timeclock_engine::models::{
    AttendanceRecord, AttendanceStatus, DateKey, Employee, KioskState, Schedule,
    duration_to_hours,
};

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap()
}

fn make_date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn employee(rate_cents: i64) -> Employee {
    Employee {
        id: "e1".to_string(),
        name: "Ivan Petrov".to_string(),
        rate: Decimal::new(rate_cents, 2),
    }
}

/// Builds a completed shift starting `offset_minutes` after the base instant.
fn shift(index: usize, offset_minutes: i64, length_minutes: i64) -> AttendanceRecord {
    let start = base() + Duration::minutes(offset_minutes);
    AttendanceRecord {
        id: format!("a{}", index),
        employee_id: "e1".to_string(),
        employee_name: "Ivan Petrov".to_string(),
        clock_in_time: start,
        clock_in_photo: String::new(),
        clock_out_time: Some(start + Duration::minutes(length_minutes)),
        clock_out_photo: None,
        status: AttendanceStatus::ClockedOut,
    }
}

fn march_window() -> ReportWindow {
    ReportWindow::new(make_date(1), make_date(31), &Moscow).unwrap()
}

/// (offset, length) pairs in minutes that stay well inside March in Moscow
/// time. Lengths are whole quarter hours so hour sums are exact.
fn shifts_strategy() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((0i64..20 * 24 * 60, (1i64..48).prop_map(|q| q * 15)), 0..20)
}

proptest! {
    #[test]
    fn prop_pay_is_hours_times_rate(
        rate_cents in 0i64..100_000,
        pairs in shifts_strategy(),
    ) {
        let emp = employee(rate_cents);
        let records: Vec<AttendanceRecord> = pairs
            .iter()
            .enumerate()
            .map(|(i, (offset, len))| shift(i, *offset, *len))
            .collect();

        let rows = compute_report(std::slice::from_ref(&emp), &records, &march_window());
        let row = &rows[0];

        let expected_hours: Decimal = pairs
            .iter()
            .map(|(_, len)| duration_to_hours(Duration::minutes(*len)))
            .sum();
        prop_assert_eq!(row.total_hours, expected_hours);
        prop_assert_eq!(row.total_pay, row.total_hours * emp.rate);
        prop_assert_eq!(row.shifts.len(), pairs.len());
    }

    #[test]
    fn prop_open_shifts_contribute_nothing(
        rate_cents in 1i64..100_000,
        offsets in prop::collection::vec(0i64..20 * 24 * 60, 0..10),
    ) {
        let emp = employee(rate_cents);
        let records: Vec<AttendanceRecord> = offsets
            .iter()
            .enumerate()
            .map(|(i, offset)| {
                let mut record = shift(i, *offset, 60);
                record.clock_out_time = None;
                record.status = AttendanceStatus::ClockedIn;
                record
            })
            .collect();

        let rows = compute_report(std::slice::from_ref(&emp), &records, &march_window());
        prop_assert_eq!(rows[0].total_hours, Decimal::ZERO);
        prop_assert_eq!(rows[0].total_pay, Decimal::ZERO);
        prop_assert!(rows[0].shifts.is_empty());
    }

    #[test]
    fn prop_report_shifts_are_sorted(pairs in shifts_strategy()) {
        let records: Vec<AttendanceRecord> = pairs
            .iter()
            .enumerate()
            .map(|(i, (offset, len))| shift(i, *offset, *len))
            .collect();

        let rows = compute_report(&[employee(30_000)], &records, &march_window());
        let starts: Vec<DateTime<Utc>> = rows[0].shifts.iter().map(|s| s.clock_in_time).collect();
        prop_assert!(starts.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn prop_schedule_never_holds_empty_sets(
        ops in prop::collection::vec((1u32..=28, prop::collection::vec("e[0-3]", 0..4)), 0..30),
        removed in "e[0-3]",
    ) {
        let mut schedule = Schedule::new();
        for (day, ids) in &ops {
            let date = DateKey::new(make_date(*day));
            schedule = set_scheduled(&schedule, date, ids.iter().cloned());
            prop_assert_eq!(get_scheduled(&schedule, date).len(), {
                let mut unique = ids.clone();
                unique.sort();
                unique.dedup();
                unique.len()
            });
        }

        let schedule = remove_employee(&schedule, &removed);
        for (_, ids) in schedule.iter() {
            prop_assert!(!ids.is_empty());
            prop_assert!(!ids.contains(&removed));
        }
    }

    #[test]
    fn prop_open_shift_means_active(
        scheduled in any::<bool>(),
        opened_minutes_ago in 0i64..600,
    ) {
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 15, 0, 0).unwrap();
        let emp = employee(30_000);
        let open = AttendanceRecord {
            id: "open".to_string(),
            employee_id: emp.id.clone(),
            employee_name: emp.name.clone(),
            clock_in_time: now - Duration::minutes(opened_minutes_ago),
            clock_in_photo: String::new(),
            clock_out_time: None,
            clock_out_photo: None,
            status: AttendanceStatus::ClockedIn,
        };
        let mut schedule = Schedule::new();
        if scheduled {
            schedule.set(DateKey::new(make_date(5)), vec![emp.id.clone()]);
        }

        let status = derive(&emp, &[open], &schedule, now, &Moscow);
        prop_assert_eq!(status.state, KioskState::Active);
        prop_assert!(status.minutes_worked_today.is_some_and(|m| m >= 0));
    }
}
