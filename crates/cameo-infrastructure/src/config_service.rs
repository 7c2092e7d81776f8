//! Configuration service.
//!
//! Loads the root configuration from `config.toml`, creating the file
//! with defaults on first run, and caches it for the life of the process.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use tracing::warn;

use cameo_core::config::RootConfig;
use cameo_core::error::Result;

use crate::paths::CameoPaths;

/// Loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration; RwLock for thread-safe lazy loading.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Service over the platform config file location.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(CameoPaths::config_file()?))
    }

    /// Service over an explicit config file path.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// The configuration, loading from file on first access.
    ///
    /// A missing file is created with defaults; an unreadable or
    /// malformed file logs a warning and yields defaults without
    /// rewriting it.
    pub fn get_config(&self) -> RootConfig {
        {
            let read_lock = self.config.read().unwrap();
            if let Some(cached) = read_lock.as_ref() {
                return cached.clone();
            }
        }

        let loaded = self.load_or_create();

        {
            let mut write_lock = self.config.write().unwrap();
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Drops the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap();
        *write_lock = None;
    }

    fn load_or_create(&self) -> RootConfig {
        if !self.path.exists() {
            let default = RootConfig::default();
            if let Err(e) = self.write_default(&default) {
                warn!(path = %self.path.display(), error = %e, "could not write default config");
            }
            return default;
        }

        match fs::read_to_string(&self.path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "malformed config, using defaults");
                    RootConfig::default()
                }
            },
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable config, using defaults");
                RootConfig::default()
            }
        }
    }

    fn write_default(&self, default: &RootConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(default)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}
