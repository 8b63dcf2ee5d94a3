//! Core data models for the time clock engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod employee;
mod kiosk;
mod report;
mod schedule;

pub use attendance::{AttendanceRecord, AttendanceStatus, MILLIS_PER_HOUR, duration_to_hours};
pub use employee::{Employee, NewEmployee};
pub use kiosk::{ClockAction, KioskState, KioskStatus};
pub use report::{PayrollReport, ReportRow, ReportShift, ReportTotals};
pub use schedule::{DateKey, Schedule};
