//! Month view of attendance and schedules.
//!
//! Builds a Monday-first month grid where each day lists who clocked in and
//! who was scheduled.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, DateKey, Employee, Schedule};

use super::local_date::date_key;

/// An employee shown in a calendar cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEntry {
    /// The employee shown in the cell.
    pub employee_id: String,
    /// First word of the employee's name, as shown in the cell.
    pub first_name: String,
}

/// One day of the calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// The local day.
    pub date: DateKey,
    /// Employees with a clock-in on this local date, ordered by ID.
    pub attended: Vec<CalendarEntry>,
    /// Known employees scheduled on this date, ordered by ID.
    pub scheduled: Vec<CalendarEntry>,
}

/// A calendar month laid out on Monday-first weeks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMonth {
    /// Calendar year.
    pub year: i32,
    /// Month number, 1 to 12.
    pub month: u32,
    /// Empty cells before the 1st (0 when the month starts on a Monday).
    pub leading_blank_days: u32,
    /// Every day of the month in order.
    pub days: Vec<CalendarDay>,
}

/// Builds the calendar for one month.
///
/// Attendance is keyed by the local date of each clock-in, including open
/// shifts. Scheduled IDs that do not belong to a known employee are dropped.
///
/// # Errors
///
/// Returns [`EngineError::InvalidDate`] if `month` is not in `1..=12` or the
/// year is out of range.
pub fn build_month<Tz: TimeZone>(
    year: i32,
    month: u32,
    employees: &[Employee],
    records: &[AttendanceRecord],
    schedule: &Schedule,
    tz: &Tz,
) -> EngineResult<CalendarMonth> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| EngineError::InvalidDate {
        value: format!("{:04}-{:02}", year, month),
        message: "not a valid calendar month".to_string(),
    })?;

    let names: BTreeMap<&str, &Employee> = employees.iter().map(|e| (e.id.as_str(), e)).collect();

    let mut attended_by_date: BTreeMap<DateKey, BTreeMap<String, String>> = BTreeMap::new();
    for record in records {
        let key = date_key(record.clock_in_time, tz);
        if key.date().year() != year || key.date().month() != month {
            continue;
        }
        let first_name = record
            .employee_name
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
        attended_by_date
            .entry(key)
            .or_default()
            .entry(record.employee_id.clone())
            .or_insert(first_name);
    }

    let days = first
        .iter_days()
        .take_while(|d| d.month() == month)
        .map(|date| {
            let key = DateKey::new(date);
            let attended = attended_by_date
                .remove(&key)
                .unwrap_or_default()
                .into_iter()
                .map(|(employee_id, first_name)| CalendarEntry {
                    employee_id,
                    first_name,
                })
                .collect();
            let scheduled = schedule
                .get(key)
                .into_iter()
                .flatten()
                .filter_map(|id| names.get(id.as_str()))
                .map(|employee| CalendarEntry {
                    employee_id: employee.id.clone(),
                    first_name: employee.first_name().to_string(),
                })
                .collect();
            CalendarDay {
                date: key,
                attended,
                scheduled,
            }
        })
        .collect();

    Ok(CalendarMonth {
        year,
        month,
        leading_blank_days: first.weekday().num_days_from_monday(),
        days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttendanceStatus;
    use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
    use rust_decimal::Decimal;

    fn make_utc(s: &str) -> DateTime<Utc> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .unwrap()
            .and_utc()
    }

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn create_employee(id: &str, name: &str) -> Employee {
        Employee {
            id: id.to_string(),
            name: name.to_string(),
            rate: Decimal::new(300, 0),
        }
    }

    fn create_record(employee: &Employee, start: &str) -> AttendanceRecord {
        AttendanceRecord {
            id: format!("att-{}-{}", employee.id, start),
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            clock_in_time: make_utc(start),
            clock_in_photo: String::new(),
            clock_out_time: None,
            clock_out_photo: None,
            status: AttendanceStatus::ClockedIn,
        }
    }

    fn day<'a>(month: &'a CalendarMonth, date: &str) -> &'a CalendarDay {
        month.days.iter().find(|d| d.date == key(date)).unwrap()
    }

    #[test]
    fn test_month_layout() {
        // March 2024 starts on a Friday.
        let month = build_month(2024, 3, &[], &[], &Schedule::new(), &Utc).unwrap();
        assert_eq!(month.days.len(), 31);
        assert_eq!(month.leading_blank_days, 4);
        assert_eq!(month.days[0].date, key("2024-03-01"));
        assert_eq!(month.days[30].date, key("2024-03-31"));
    }

    #[test]
    fn test_leap_february() {
        let month = build_month(2024, 2, &[], &[], &Schedule::new(), &Utc).unwrap();
        assert_eq!(month.days.len(), 29);
        // 2024-02-01 is a Thursday.
        assert_eq!(month.leading_blank_days, 3);
    }

    #[test]
    fn test_month_starting_on_monday_has_no_blanks() {
        let month = build_month(2024, 4, &[], &[], &Schedule::new(), &Utc).unwrap();
        assert_eq!(month.leading_blank_days, 0);
    }

    #[test]
    fn test_invalid_month_is_rejected() {
        let result = build_month(2024, 13, &[], &[], &Schedule::new(), &Utc);
        assert!(matches!(result, Err(EngineError::InvalidDate { .. })));

        let result = build_month(2024, 0, &[], &[], &Schedule::new(), &Utc);
        assert!(matches!(result, Err(EngineError::InvalidDate { .. })));
    }

    #[test]
    fn test_attendance_grouped_by_local_day_and_deduplicated() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let ivan = create_employee("e1", "Ivan Petrov");
        let records = vec![
            // 23:30 local on 03-05
            create_record(&ivan, "2024-03-06 04:30:00"),
            create_record(&ivan, "2024-03-05 14:00:00"),
        ];

        let month = build_month(2024, 3, &[ivan], &records, &Schedule::new(), &tz).unwrap();

        let fifth = day(&month, "2024-03-05");
        assert_eq!(fifth.attended.len(), 1);
        assert_eq!(fifth.attended[0].employee_id, "e1");
        assert_eq!(fifth.attended[0].first_name, "Ivan");
        assert!(day(&month, "2024-03-06").attended.is_empty());
    }

    #[test]
    fn test_records_outside_month_are_ignored() {
        let ivan = create_employee("e1", "Ivan");
        let records = vec![create_record(&ivan, "2024-04-01 09:00:00")];

        let month = build_month(2024, 3, &[ivan], &records, &Schedule::new(), &Utc).unwrap();

        assert!(month.days.iter().all(|d| d.attended.is_empty()));
    }

    #[test]
    fn test_scheduled_drops_unknown_ids() {
        let employees = vec![create_employee("e1", "Ivan Petrov"), create_employee("e2", "Anna")];
        let mut schedule = Schedule::new();
        schedule.set(
            key("2024-03-05"),
            vec!["e2".to_string(), "ghost".to_string(), "e1".to_string()],
        );

        let month = build_month(2024, 3, &employees, &[], &schedule, &Utc).unwrap();

        let scheduled: Vec<&str> = day(&month, "2024-03-05")
            .scheduled
            .iter()
            .map(|e| e.employee_id.as_str())
            .collect();
        assert_eq!(scheduled, vec!["e1", "e2"]);
        assert_eq!(day(&month, "2024-03-05").scheduled[0].first_name, "Ivan");
    }
}
