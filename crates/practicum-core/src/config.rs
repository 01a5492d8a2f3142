//! Configuration file management for Practicum.
//!
//! Reads `~/.config/practicum/config.toml` when present and falls back to
//! defaults otherwise. The backend base address can also be overridden via
//! the `PRACTICUM_BASE_URL` environment variable.

use crate::error::{PracticumError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default backend origin the training backend listens on.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Base address of the counseling backend
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Number of personas requested per roster page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Timeout applied to every backend request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Use the built-in persona catalog instead of the backend roster
    #[serde(default)]
    pub offline: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    8
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            request_timeout_secs: default_request_timeout_secs(),
            offline: false,
        }
    }
}

impl AppConfig {
    /// Loads the configuration from the default location.
    ///
    /// A missing file is not an error: defaults are returned. A present but
    /// unreadable or malformed file is.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let mut config = match config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };

        if let Ok(base_url) = std::env::var("PRACTICUM_BASE_URL") {
            if !base_url.trim().is_empty() {
                config.base_url = base_url;
            }
        }

        Ok(config)
    }

    /// Loads the configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed as TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PracticumError::config(format!(
                "Failed to read configuration file at {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(toml::from_str(&content)?)
    }
}

/// Returns the path to the configuration file: `~/.config/practicum/config.toml`
fn config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("practicum").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.page_size, 8);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(!config.offline);
    }

    #[test]
    fn test_load_from_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "base_url = \"http://10.0.0.2:9090\"").unwrap();
        writeln!(file, "offline = true").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.2:9090");
        assert!(config.offline);
        // Unspecified fields fall back to defaults
        assert_eq!(config.page_size, 8);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_load_from_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_url = [not toml").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, PracticumError::Serialization { .. }));
    }

    #[test]
    fn test_load_from_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, PracticumError::Config(_)));
    }
}
