//! Platform path resolution.
//!
//! Configuration lives under the platform config directory, archives and
//! catalogs under the platform data directory, with a config override for
//! the data root.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/cameo/             # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/cameo/        # Data directory (or config data_dir override)
//! ├── archives/                # One JSON array per archiving persona
//! │   ├── checkins.json
//! │   ├── leads.json
//! │   └── ...
//! ├── catalogs/                # Optional catalog files (last candidate)
//! └── cases.json               # Fraud case working copy
//! ```

use std::path::PathBuf;

use cameo_core::config::RootConfig;
use cameo_core::error::{CameoError, Result};

const APP_DIR: &str = "cameo";

/// Unified path management.
pub struct CameoPaths;

impl CameoPaths {
    /// The configuration directory, e.g. `~/.config/cameo`.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| CameoError::config("cannot determine the platform config directory"))
    }

    /// Path to `config.toml`.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// The data directory, honoring the config override.
    pub fn data_dir(config: &RootConfig) -> Result<PathBuf> {
        if let Some(dir) = &config.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| CameoError::config("cannot determine the platform data directory"))
    }

    /// Directory holding archive files.
    pub fn archives_dir(config: &RootConfig) -> Result<PathBuf> {
        Ok(Self::data_dir(config)?.join("archives"))
    }

    /// Directory searched last for catalog files.
    pub fn catalogs_dir(config: &RootConfig) -> Result<PathBuf> {
        Ok(Self::data_dir(config)?.join("catalogs"))
    }

    /// Working copy of the fraud case file.
    pub fn cases_file(config: &RootConfig) -> Result<PathBuf> {
        Ok(Self::data_dir(config)?.join(&config.catalogs.cases))
    }

    /// Archive path for a persona's archive file name.
    pub fn archive_file(config: &RootConfig, file_name: &str) -> Result<PathBuf> {
        Ok(Self::archives_dir(config)?.join(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_under_config_dir() {
        let config_file = CameoPaths::config_file().unwrap();
        assert!(config_file.ends_with("cameo/config.toml"));
        assert!(config_file.starts_with(CameoPaths::config_dir().unwrap()));
    }

    #[test]
    fn test_data_dir_override_is_honored() {
        let mut config = RootConfig::default();
        config.data_dir = Some(PathBuf::from("/srv/cameo-data"));

        let archives = CameoPaths::archives_dir(&config).unwrap();
        assert_eq!(archives, PathBuf::from("/srv/cameo-data/archives"));

        let cases = CameoPaths::cases_file(&config).unwrap();
        assert_eq!(cases, PathBuf::from("/srv/cameo-data/cases.json"));
    }

    #[test]
    fn test_default_data_dir_ends_with_app_name() {
        let config = RootConfig::default();
        let data_dir = CameoPaths::data_dir(&config).unwrap();
        assert!(data_dir.ends_with(APP_DIR));
    }

    #[test]
    fn test_archive_file_lands_in_archives_dir() {
        let mut config = RootConfig::default();
        config.data_dir = Some(PathBuf::from("/srv/cameo-data"));
        let path = CameoPaths::archive_file(&config, "leads.json").unwrap();
        assert_eq!(path, PathBuf::from("/srv/cameo-data/archives/leads.json"));
    }
}
