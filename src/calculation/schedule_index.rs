//! Schedule lookup and replacement.
//!
//! The schedule maps local calendar days to the employees expected to work
//! them. Functions here never mutate their input; each write returns a new
//! [`Schedule`].

use std::collections::BTreeSet;

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{DateKey, Schedule};

use super::local_date::date_key;

/// Returns the employees scheduled on a date.
///
/// A date with no entry yields an empty set.
pub fn get_scheduled(schedule: &Schedule, date: DateKey) -> BTreeSet<String> {
    schedule.get(date).cloned().unwrap_or_default()
}

/// Returns the employees scheduled on the local day containing `instant`.
pub fn scheduled_on<Tz: TimeZone>(
    schedule: &Schedule,
    instant: DateTime<Utc>,
    tz: &Tz,
) -> BTreeSet<String> {
    get_scheduled(schedule, date_key(instant, tz))
}

/// Replaces the scheduled set for a date.
///
/// Setting an empty set removes the date from the schedule. Setting the same
/// set twice yields the same schedule.
///
/// # Example
///
/// ```
/// use timeclock_engine::calculation::{get_scheduled, set_scheduled};
/// use timeclock_engine::models::{DateKey, Schedule};
///
/// let date: DateKey = "2024-03-05".parse().unwrap();
/// let schedule = set_scheduled(&Schedule::new(), date, ["e1".to_string(), "e2".to_string()]);
/// assert_eq!(get_scheduled(&schedule, date).len(), 2);
///
/// let schedule = set_scheduled(&schedule, date, Vec::<String>::new());
/// assert!(schedule.get(date).is_none());
/// ```
pub fn set_scheduled<I>(schedule: &Schedule, date: DateKey, employee_ids: I) -> Schedule
where
    I: IntoIterator<Item = String>,
{
    let mut next = schedule.clone();
    next.set(date, employee_ids);
    next
}

/// Removes an employee from every date, dropping dates left empty.
pub fn remove_employee(schedule: &Schedule, employee_id: &str) -> Schedule {
    Schedule::from_entries(schedule.iter().map(|(date, ids)| {
        let remaining: Vec<String> = ids.iter().filter(|id| *id != employee_id).cloned().collect();
        (date, remaining)
    }))
}
