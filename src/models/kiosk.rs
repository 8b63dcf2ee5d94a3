//! Kiosk board models.
//!
//! This module contains the per-employee display state derived for the kiosk
//! board and the clock actions an employee can take.

use serde::{Deserialize, Serialize};

use super::{AttendanceRecord, Employee};

/// What the kiosk board shows for one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KioskState {
    /// No open shift and not on today's schedule.
    Idle,
    /// No open shift, but on today's schedule.
    Scheduled,
    /// Has an open shift. Takes precedence over being scheduled.
    Active,
}

/// A clock action requested at the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClockAction {
    /// Start a shift.
    ClockIn,
    /// End the open shift.
    ClockOut,
}

impl std::fmt::Display for ClockAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClockAction::ClockIn => write!(f, "clock-in"),
            ClockAction::ClockOut => write!(f, "clock-out"),
        }
    }
}

/// The derived kiosk board entry for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KioskStatus {
    /// The employee this entry describes.
    pub employee: Employee,
    /// Display state.
    pub state: KioskState,
    /// The open shift, when the employee is active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_shift: Option<AttendanceRecord>,
    /// The completed shift with the latest clock-out time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_completed_shift: Option<AttendanceRecord>,
    /// Whole minutes worked today including the open shift. Only set when active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes_worked_today: Option<i64>,
}
