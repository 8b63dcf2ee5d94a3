//! In-memory document store.
//!
//! Holds employees, attendance records and the schedule behind a single
//! `tokio::sync::RwLock`. Reads hand out cloned [`Snapshot`]s for the pure
//! calculation functions; every write takes the write lock for its whole
//! check-then-act sequence, so at most one shift per employee is ever open.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::calculation::{
    ClockTransition, get_scheduled, next_action, plan_clock_action, remove_employee,
    set_scheduled,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, ClockAction, DateKey, Employee, NewEmployee, Schedule};

/// An immutable copy of the store's contents used for one computation.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Employees in insertion order.
    pub employees: Vec<Employee>,
    /// Every attendance record, in insertion order.
    pub attendance: Vec<AttendanceRecord>,
    /// Scheduled employee IDs per local day.
    pub schedule: Schedule,
}

/// What an employee deletion removed.
#[derive(Debug, Clone)]
pub struct DeletedEmployee {
    /// The employee as it was before removal.
    pub employee: Employee,
    /// Number of attendance records removed with the employee.
    pub removed_records: usize,
}

/// Shared in-memory store.
///
/// Cloning is cheap; clones share the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<Snapshot>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from existing contents.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            state: Arc::new(RwLock::new(snapshot)),
        }
    }

    /// Inserts the given employees if the store has no employees yet.
    ///
    /// Returns the employees that were inserted.
    pub async fn seed(&self, employees: &[NewEmployee]) -> Vec<Employee> {
        let mut state = self.state.write().await;
        if !state.employees.is_empty() {
            debug!(existing = state.employees.len(), "Store already populated, skipping seed");
            return Vec::new();
        }
        let inserted: Vec<Employee> = employees
            .iter()
            .cloned()
            .map(|e| e.with_id(new_id()))
            .collect();
        state.employees.extend(inserted.iter().cloned());
        debug!(count = inserted.len(), "Seeded employees");
        inserted
    }

    /// Returns a copy of the whole store.
    pub async fn snapshot(&self) -> Snapshot {
        self.state.read().await.clone()
    }

    /// Lists employees in insertion order.
    pub async fn employees(&self) -> Vec<Employee> {
        self.state.read().await.employees.clone()
    }

    /// Looks up one employee.
    pub async fn employee(&self, employee_id: &str) -> EngineResult<Employee> {
        let state = self.state.read().await;
        find_employee(&state.employees, employee_id).cloned()
    }

    /// Stores a new employee and returns it with its assigned ID.
    pub async fn add_employee(&self, employee: NewEmployee) -> Employee {
        let mut state = self.state.write().await;
        let employee = employee.with_id(new_id());
        state.employees.push(employee.clone());
        debug!(employee_id = %employee.id, "Added employee");
        employee
    }

    /// Stores several employees under one lock acquisition.
    pub async fn add_employees(&self, employees: Vec<NewEmployee>) -> Vec<Employee> {
        let mut state = self.state.write().await;
        let added: Vec<Employee> = employees.into_iter().map(|e| e.with_id(new_id())).collect();
        state.employees.extend(added.iter().cloned());
        debug!(count = added.len(), "Added employees");
        added
    }

    /// Renames an employee and/or changes the rate.
    ///
    /// Attendance records keep the name they were clocked in with.
    pub async fn update_employee(
        &self,
        employee_id: &str,
        update: NewEmployee,
    ) -> EngineResult<Employee> {
        let mut state = self.state.write().await;
        let employee = state
            .employees
            .iter_mut()
            .find(|e| e.id == employee_id)
            .ok_or_else(|| not_found(employee_id))?;
        employee.name = update.name;
        employee.rate = update.rate;
        debug!(employee_id, "Updated employee");
        Ok(employee.clone())
    }

    /// Deletes an employee together with their attendance records and removes
    /// them from every schedule entry.
    pub async fn delete_employee(&self, employee_id: &str) -> EngineResult<DeletedEmployee> {
        let mut state = self.state.write().await;
        let position = state
            .employees
            .iter()
            .position(|e| e.id == employee_id)
            .ok_or_else(|| not_found(employee_id))?;
        let employee = state.employees.remove(position);

        let before = state.attendance.len();
        state.attendance.retain(|r| r.employee_id != employee_id);
        let removed_records = before - state.attendance.len();

        state.schedule = remove_employee(&state.schedule, employee_id);

        debug!(employee_id, removed_records, "Deleted employee");
        Ok(DeletedEmployee {
            employee,
            removed_records,
        })
    }

    /// Lists attendance records, most recent clock-in first.
    pub async fn attendance(&self, employee_id: Option<&str>) -> Vec<AttendanceRecord> {
        let state = self.state.read().await;
        let mut records: Vec<AttendanceRecord> = state
            .attendance
            .iter()
            .filter(|r| employee_id.is_none_or(|id| r.employee_id == id))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.clock_in_time.cmp(&a.clock_in_time));
        records
    }

    /// Clocks an employee in or out.
    ///
    /// With no explicit action the terminal's single-button behaviour applies:
    /// clock out if a shift is open, clock in otherwise. The open-shift check
    /// and the write happen under the same lock.
    pub async fn clock(
        &self,
        employee_id: &str,
        action: Option<ClockAction>,
        photo: &str,
        now: DateTime<Utc>,
    ) -> EngineResult<ClockTransition> {
        let mut state = self.state.write().await;
        let employee = find_employee(&state.employees, employee_id)?.clone();
        let action = action.unwrap_or_else(|| next_action(employee_id, &state.attendance));

        let transition = plan_clock_action(&employee, action, photo, &state.attendance, now)?;
        match &transition {
            ClockTransition::Opened(record) => state.attendance.push(record.clone()),
            ClockTransition::Closed(record) => {
                if let Some(stored) = state.attendance.iter_mut().find(|r| r.id == record.id) {
                    *stored = record.clone();
                }
            }
        }
        debug!(employee_id, record_id = %transition.record().id, action = %action, "Applied clock action");
        Ok(transition)
    }

    /// Returns the employees scheduled on a date.
    pub async fn scheduled(&self, date: DateKey) -> BTreeSet<String> {
        get_scheduled(&self.state.read().await.schedule, date)
    }

    /// Replaces the employees scheduled on a date and returns the stored set.
    ///
    /// An empty set removes the date.
    pub async fn set_scheduled(&self, date: DateKey, employee_ids: Vec<String>) -> BTreeSet<String> {
        let mut state = self.state.write().await;
        state.schedule = set_scheduled(&state.schedule, date, employee_ids);
        debug!(date = %date, "Updated schedule");
        get_scheduled(&state.schedule, date)
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn not_found(employee_id: &str) -> EngineError {
    EngineError::EmployeeNotFound {
        employee_id: employee_id.to_string(),
    }
}

fn find_employee<'a>(employees: &'a [Employee], employee_id: &str) -> EngineResult<&'a Employee> {
    employees
        .iter()
        .find(|e| e.id == employee_id)
        .ok_or_else(|| not_found(employee_id))
}
