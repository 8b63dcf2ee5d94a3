//! Time Clock Engine for an employee attendance kiosk
//!
//! This crate provides the attendance, scheduling and payroll logic behind a
//! shared time clock terminal: employees clock in and out with a photo, admins
//! plan schedules, and payroll reports sum hours and pay over local calendar
//! date ranges.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod store;
