//! Calculation logic for the time clock engine.
//!
//! This module contains the pure functions behind every screen of the kiosk:
//! local calendar day resolution, payroll report aggregation, schedule lookup,
//! kiosk board state, clock action planning, the attendance calendar and
//! employee input validation.

mod attendance_calendar;
mod clock_action;
mod kiosk_state;
mod local_date;
mod payroll_report;
mod schedule_index;
mod validation;

pub use attendance_calendar::{CalendarDay, CalendarEntry, CalendarMonth, build_month};
pub use clock_action::{ClockTransition, find_open_shift, next_action, plan_clock_action};
pub use kiosk_state::{derive, derive_all};
pub use local_date::{date_key, end_of_day, start_of_day};
pub use payroll_report::{ReportWindow, build_payroll_report, compute_report};
pub use schedule_index::{get_scheduled, remove_employee, scheduled_on, set_scheduled};
pub use validation::{MAX_RATE, parse_rate, validate_name, validate_new_employee, validate_rate};
