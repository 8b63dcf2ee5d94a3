//! Schedule and date key models.
//!
//! This module contains the [`DateKey`] type that names a local calendar day
//! and the [`Schedule`] map from days to scheduled employee IDs.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A local calendar date, written as `YYYY-MM-DD`.
///
/// Date keys are always derived in the kiosk's configured time zone, never in
/// UTC, so a shift at 23:30 local time belongs to that local day.
///
/// # Example
///
/// ```
/// use timeclock_engine::models::DateKey;
///
/// let key: DateKey = "2024-03-05".parse().unwrap();
/// assert_eq!(key.to_string(), "2024-03-05");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Wraps a calendar date.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the wrapped calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|e| EngineError::InvalidDate {
                value: s.to_string(),
                message: e.to_string(),
            })
    }
}

/// Which employees are scheduled on which days.
///
/// Holds at most one entry per date and never holds an empty set: assigning
/// an empty set removes the date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<DateKey, BTreeSet<String>>",
    into = "BTreeMap<DateKey, BTreeSet<String>>"
)]
pub struct Schedule {
    entries: BTreeMap<DateKey, BTreeSet<String>>,
}

impl From<BTreeMap<DateKey, BTreeSet<String>>> for Schedule {
    fn from(entries: BTreeMap<DateKey, BTreeSet<String>>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<Schedule> for BTreeMap<DateKey, BTreeSet<String>> {
    fn from(schedule: Schedule) -> Self {
        schedule.entries
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schedule from raw entries, dropping any empty sets.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (DateKey, S)>,
        S: IntoIterator<Item = String>,
    {
        let mut schedule = Self::new();
        for (date, ids) in entries {
            schedule.set(date, ids);
        }
        schedule
    }

    /// Returns the scheduled IDs for a date, if the date has an entry.
    pub fn get(&self, date: DateKey) -> Option<&BTreeSet<String>> {
        self.entries.get(&date)
    }

    /// Returns true if the employee is scheduled on the given date.
    pub fn contains(&self, date: DateKey, employee_id: &str) -> bool {
        self.entries
            .get(&date)
            .is_some_and(|ids| ids.contains(employee_id))
    }

    /// Replaces the set for a date. An empty set removes the entry.
    pub fn set<S>(&mut self, date: DateKey, employee_ids: S)
    where
        S: IntoIterator<Item = String>,
    {
        let ids: BTreeSet<String> = employee_ids.into_iter().collect();
        if ids.is_empty() {
            self.entries.remove(&date);
        } else {
            self.entries.insert(date, ids);
        }
    }

    /// Iterates over entries in date order.
    pub fn iter(&self) -> impl Iterator<Item = (DateKey, &BTreeSet<String>)> {
        self.entries.iter().map(|(date, ids)| (*date, ids))
    }

    /// Returns the number of dates with at least one scheduled employee.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no date has an entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
