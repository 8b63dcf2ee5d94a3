//! Configuration loading and management for the time clock kiosk.
//!
//! This module loads the kiosk's settings (name, time zone, currency, server
//! and logging) and its optional seed employees from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use timeclock_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded kiosk: {}", config.kiosk().name);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, parse_timezone};
pub use types::{KioskSettings, LoggingSettings, SeedEmployee, SeedEmployeesConfig, ServerSettings};
