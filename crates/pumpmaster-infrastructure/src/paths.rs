//! Unified path management for PumpMaster files.
//!
//! All configuration and data locations are resolved here so the rest of
//! the codebase never hardcodes a directory.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/pumpmaster/        # Config directory
//! ├── config.toml              # Console configuration
//! └── credentials.toml         # Persisted session token pair
//!
//! ~/.local/share/pumpmaster/   # Data directory
//! └── logs/
//!     └── console.log          # Structured JSON log output
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for PumpMaster.
pub struct PumpMasterPaths;

impl PumpMasterPaths {
    /// Returns the PumpMaster configuration directory
    /// (e.g., `~/.config/pumpmaster/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("pumpmaster"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the PumpMaster data directory
    /// (e.g., `~/.local/share/pumpmaster/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join("pumpmaster"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the console configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted credentials file.
    ///
    /// # Security Note
    ///
    /// The credential store sets this file to mode 600 on Unix.
    pub fn credentials_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("credentials.toml"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        let config_dir = PumpMasterPaths::config_dir().unwrap();
        assert!(config_dir.ends_with("pumpmaster"));
    }

    #[test]
    fn test_config_file() {
        let config_file = PumpMasterPaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        let config_dir = PumpMasterPaths::config_dir().unwrap();
        assert!(config_file.starts_with(&config_dir));
    }

    #[test]
    fn test_credentials_file() {
        let credentials_file = PumpMasterPaths::credentials_file().unwrap();
        assert!(credentials_file.ends_with("credentials.toml"));
        let config_dir = PumpMasterPaths::config_dir().unwrap();
        assert!(credentials_file.starts_with(&config_dir));
    }

    #[test]
    fn test_logs_dir() {
        let logs_dir = PumpMasterPaths::logs_dir().unwrap();
        assert!(logs_dir.ends_with("logs"));
        let data_dir = PumpMasterPaths::data_dir().unwrap();
        assert!(logs_dir.starts_with(&data_dir));
    }
}
