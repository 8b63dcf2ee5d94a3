//! Configuration types for the kiosk.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Settings from `kiosk.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct KioskSettings {
    /// Display name of the kiosk installation.
    pub name: String,
    /// IANA time zone name (e.g. "Europe/Moscow"). Every local calendar day
    /// in the engine is taken in this zone.
    pub timezone: String,
    /// Currency code shown next to pay amounts.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSettings,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Socket address to listen on.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// Maximum level passed to the tracing subscriber ("error" through "trace").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// A seed employee from `employees.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedEmployee {
    /// Display name.
    pub name: String,
    /// Hourly rate.
    pub rate: Decimal,
}

/// Structure of `employees.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedEmployeesConfig {
    /// Employees to create on first start.
    #[serde(default)]
    pub employees: Vec<SeedEmployee>,
}

fn default_currency() -> String {
    "RUB".to_string()
}

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
