//! Local calendar day handling.
//!
//! Every day boundary in the engine (report ranges, "today" on the kiosk
//! board, schedule keys, calendar cells) is taken in the kiosk's configured
//! time zone. This module converts between UTC instants and local calendar
//! days.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::{EngineError, EngineResult};
use crate::models::DateKey;

/// How far past a skipped local midnight we search for the first valid instant.
const MAX_GAP_STEPS: i64 = 12;
const GAP_STEP_MINUTES: i64 = 15;

/// Returns the local calendar day an instant falls on.
///
/// # Example
///
/// ```
/// use timeclock_engine::calculation::date_key;
/// use chrono::{FixedOffset, TimeZone, Utc};
///
/// // 23:30 on 5 March in UTC+3 is 20:30 UTC.
/// let tz = FixedOffset::east_opt(3 * 3600).unwrap();
/// let instant = Utc.with_ymd_and_hms(2024, 3, 5, 20, 30, 0).unwrap();
/// assert_eq!(date_key(instant, &tz).to_string(), "2024-03-05");
///
/// // 01:00 on 6 March in UTC+3 is still 5 March in UTC.
/// let instant = Utc.with_ymd_and_hms(2024, 3, 5, 22, 0, 0).unwrap();
/// assert_eq!(date_key(instant, &tz).to_string(), "2024-03-06");
/// ```
pub fn date_key<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> DateKey {
    DateKey::new(instant.with_timezone(tz).date_naive())
}

/// Returns the first instant of a local calendar day.
///
/// If local midnight does not exist (a daylight-saving gap), the first valid
/// local time after it is used. When a local midnight occurs twice, the
/// earlier one is used.
pub fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> EngineResult<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0)
        .and_then(|midnight| resolve_local(midnight, tz))
        .ok_or_else(|| EngineError::InvalidDate {
            value: date.to_string(),
            message: "local midnight cannot be resolved in the configured time zone".to_string(),
        })
}

/// Returns the last millisecond of a local calendar day.
pub fn end_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> EngineResult<DateTime<Utc>> {
    let next = date.succ_opt().ok_or_else(|| EngineError::InvalidDate {
        value: date.to_string(),
        message: "date is at the end of the supported calendar".to_string(),
    })?;
    Ok(start_of_day(next, tz)? - Duration::milliseconds(1))
}

fn resolve_local<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    (0..=MAX_GAP_STEPS)
        .map(|step| naive + Duration::minutes(step * GAP_STEP_MINUTES))
        .find_map(|candidate| tz.from_local_datetime(&candidate).earliest())
        .map(|local| local.with_timezone(&Utc))
}
