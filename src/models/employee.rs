//! Employee model.
//!
//! This module defines the [`Employee`] record managed from the admin surface
//! and selected from the kiosk board.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents an employee who clocks in and out at the kiosk.
///
/// # Example
///
/// ```
/// use timeclock_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Ivan Petrov".to_string(),
///     rate: Decimal::new(350, 0),
/// };
/// assert_eq!(employee.first_name(), "Ivan");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique, opaque identifier for the employee.
    pub id: String,
    /// Display name shown on the kiosk board and in reports.
    pub name: String,
    /// Hourly pay rate in the configured currency. Never negative.
    pub rate: Decimal,
}

impl Employee {
    /// Returns the first whitespace-separated word of the employee's name.
    ///
    /// Calendar cells show this short form. A blank name yields an empty string.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }
}

/// The validated fields of an employee that has not been stored yet.
///
/// Produced by form validation and by spreadsheet import; the store assigns
/// the ID when it inserts the employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// Display name, already trimmed.
    pub name: String,
    /// Hourly pay rate, already checked to be non-negative.
    pub rate: Decimal,
}

impl NewEmployee {
    /// Turns the draft into a stored employee with the given ID.
    pub fn with_id(self, id: impl Into<String>) -> Employee {
        Employee {
            id: id.into(),
            name: self.name,
            rate: self.rate,
        }
    }
}
