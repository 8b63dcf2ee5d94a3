//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading kiosk
//! configuration from YAML files.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono_tz::Tz;
use tracing::Level;

use crate::calculation::{validate_name, validate_rate};
use crate::error::{EngineError, EngineResult};
use crate::models::NewEmployee;

use super::types::{KioskSettings, SeedEmployeesConfig};

/// Loads and provides access to kiosk configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── kiosk.yaml      # Kiosk name, time zone, currency, server, logging
/// └── employees.yaml  # Optional seed employees
/// ```
///
/// # Example
///
/// ```no_run
/// use timeclock_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("{} runs in {}", loader.kiosk().name, loader.timezone());
/// # Ok::<(), timeclock_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    kiosk: KioskSettings,
    timezone: Tz,
    seed_employees: Vec<NewEmployee>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if `kiosk.yaml` is missing
    /// - [`EngineError::ConfigParseError`] if a file is not valid YAML for its
    ///   schema
    /// - [`EngineError::InvalidTimeZone`] if the time zone is not an IANA name
    /// - [`EngineError::InvalidEmployee`] if a seed employee is invalid
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let kiosk = Self::load_yaml::<KioskSettings>(&path.join("kiosk.yaml"))?;

        let employees_path = path.join("employees.yaml");
        let seeds = if employees_path.exists() {
            Self::load_yaml::<SeedEmployeesConfig>(&employees_path)?
        } else {
            SeedEmployeesConfig::default()
        };

        let seed_employees = seeds
            .employees
            .into_iter()
            .map(|seed| {
                Ok(NewEmployee {
                    name: validate_name(&seed.name)?,
                    rate: validate_rate(seed.rate)?,
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        Self::from_settings(kiosk, seed_employees)
    }

    /// Builds a loader from already-parsed settings.
    pub fn from_settings(
        kiosk: KioskSettings,
        seed_employees: Vec<NewEmployee>,
    ) -> EngineResult<Self> {
        let timezone = parse_timezone(&kiosk.timezone)?;
        Ok(Self {
            kiosk,
            timezone,
            seed_employees,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the kiosk settings.
    pub fn kiosk(&self) -> &KioskSettings {
        &self.kiosk
    }

    /// Returns the configured time zone.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Returns the employees to insert into an empty store.
    pub fn seed_employees(&self) -> &[NewEmployee] {
        &self.seed_employees
    }

    /// Returns the address the HTTP server binds to.
    pub fn bind_address(&self) -> &str {
        &self.kiosk.server.bind_address
    }

    /// Returns the configured log level, falling back to INFO for unknown names.
    pub fn log_level(&self) -> Level {
        Level::from_str(self.kiosk.logging.level.trim()).unwrap_or(Level::INFO)
    }
}

/// Parses an IANA time zone name.
pub fn parse_timezone(name: &str) -> EngineResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| EngineError::InvalidTimeZone {
            name: name.to_string(),
        })
}
