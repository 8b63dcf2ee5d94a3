//! Application state for the time clock API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono_tz::Tz;

use crate::config::ConfigLoader;
use crate::store::MemoryStore;

/// Shared application state.
///
/// Holds the loaded configuration and the store every handler reads from and
/// writes to.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    store: MemoryStore,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: ConfigLoader, store: MemoryStore) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the store.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Returns the kiosk's time zone.
    pub fn timezone(&self) -> Tz {
        self.config.timezone()
    }
}
