//! Console settings service.
//!
//! Loads the console configuration from the configuration file
//! (~/.config/pumpmaster/config.toml) and caches it in memory.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use pumpmaster_core::config::ConsoleConfig;
use pumpmaster_core::error::{PumpMasterError, Result};
use tracing::warn;

use crate::paths::PumpMasterPaths;
use crate::storage::TomlFileStore;

/// Settings service that loads and caches the console configuration.
///
/// Reads the configuration from config.toml and caches it to avoid
/// repeated file I/O. A missing or unreadable file falls back to the
/// built-in defaults.
pub struct SettingsService {
    store: TomlFileStore<ConsoleConfig>,
    /// Cached configuration loaded from file.
    /// Uses RwLock for thread-safe lazy loading.
    cache: Arc<RwLock<Option<ConsoleConfig>>>,
}

impl SettingsService {
    /// Creates a service rooted at the default configuration path.
    ///
    /// The configuration is loaded lazily on first access to avoid blocking
    /// during initialization.
    pub fn new() -> Result<Self> {
        let path = PumpMasterPaths::config_file()
            .map_err(|e| PumpMasterError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a service backed by a specific file (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            store: TomlFileStore::new(path),
            cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the console configuration, loading from file if not cached.
    pub fn get_config(&self) -> ConsoleConfig {
        // Check if already cached
        {
            let read_lock = self.cache.read().unwrap();
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = self.load_or_default();

        // Cache it
        {
            let mut write_lock = self.cache.write().unwrap();
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.cache.write().unwrap();
        *write_lock = None;
    }

    /// Loads the configuration, writing the defaults on first run.
    fn load_or_default(&self) -> ConsoleConfig {
        match self.store.load() {
            Ok(Some(config)) => config,
            Ok(None) => {
                let defaults = ConsoleConfig::default();
                if let Err(e) = self.store.save(&defaults) {
                    warn!("[SettingsService] Failed to write default config: {}", e);
                }
                defaults
            }
            Err(e) => {
                warn!("[SettingsService] Failed to load config, using defaults: {}", e);
                ConsoleConfig::default()
            }
        }
    }
}
