//! # Configuration Module
//!
//! This module resolves where Harmony finds its catalog, where it writes the
//! usage log, and which external program plays media.
//!
//! ## Sources, lowest to highest precedence
//!
//! 1. Built-in defaults: `songs.csv` and `user_usage_logs.csv` in the working
//!    directory, `mpv --no-video` as the player
//! 2. Optional JSON config file in the platform config directory:
//!    - Linux: `~/.config/harmony/config.json`
//!    - macOS: `~/Library/Application Support/harmony/config.json`
//!    - Windows: `%APPDATA%\harmony\config.json`
//! 3. Command-line flags and their environment variables
//!
//! The admin password is not part of the configuration.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default catalog file name, relative to the working directory.
pub const DEFAULT_CATALOG: &str = "songs.csv";

/// Default usage log file name, relative to the working directory.
pub const DEFAULT_LOG: &str = "user_usage_logs.csv";

/// External media player invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Program to run
    pub command: String,
    /// Arguments placed before the media path
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            command: "mpv".to_string(),
            args: vec!["--no-video".to_string()],
        }
    }
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path to the song catalog
    pub catalog_path: PathBuf,
    /// Path to the usage log
    pub log_path: PathBuf,
    pub player: PlayerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG),
            log_path: PathBuf::from(DEFAULT_LOG),
            player: PlayerConfig::default(),
        }
    }
}

/// Values supplied on the command line, each overriding the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub catalog_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
}

impl AppConfig {
    /// Parse a JSON config file. Missing keys fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Apply command-line overrides on top of this config.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(catalog) = overrides.catalog_path {
            self.catalog_path = catalog;
        }
        if let Some(log) = overrides.log_path {
            self.log_path = log;
        }
        self
    }
}

/// Returns the platform-appropriate config file path, if a config directory exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("harmony").join("config.json"))
}

/// Build the runtime configuration.
///
/// An explicit `config_path` must exist. The default location is optional and
/// silently skipped when absent.
///
/// # Errors
///
/// This function will return an error if:
/// - an explicitly given config file does not exist
/// - a config file exists but cannot be parsed
pub fn load(config_path: Option<&Path>, overrides: Overrides) -> Result<AppConfig> {
    let base = match config_path {
        Some(path) => {
            info!("Loading config from {}", path.display());
            AppConfig::from_file(path)?
        }
        None => match default_config_path() {
            Some(path) if path.exists() => {
                info!("Loading config from {}", path.display());
                AppConfig::from_file(&path)?
            }
            _ => {
                debug!("No config file found, using defaults");
                AppConfig::default()
            }
        },
    };

    let config = base.with_overrides(overrides);
    debug!("Resolved config: {config:?}");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_working_directory_files() {
        let config = AppConfig::default();
        assert_eq!(config.catalog_path, PathBuf::from("songs.csv"));
        assert_eq!(config.log_path, PathBuf::from("user_usage_logs.csv"));
        assert_eq!(config.player.command, "mpv");
    }

    #[test]
    fn test_partial_config_file_keeps_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "catalog_path": "/srv/harmony/songs.csv" }"#)?;

        let config = load(Some(path.as_path()), Overrides::default())?;
        assert_eq!(config.catalog_path, PathBuf::from("/srv/harmony/songs.csv"));
        assert_eq!(config.log_path, PathBuf::from(DEFAULT_LOG));
        assert_eq!(config.player, PlayerConfig::default());
        Ok(())
    }

    #[test]
    fn test_overrides_win_over_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "log_path": "file.csv", "player": { "command": "afplay" } }"#,
        )?;

        let config = load(
            Some(path.as_path()),
            Overrides {
                catalog_path: None,
                log_path: Some(PathBuf::from("cli.csv")),
            },
        )?;
        assert_eq!(config.log_path, PathBuf::from("cli.csv"));
        assert_eq!(config.player.command, "afplay");
        assert!(config.player.args.is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let result = load(Some(Path::new("/definitely/not/here.json")), Overrides::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_json_is_an_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.json");
        fs::write(&path, "not json")?;
        assert!(AppConfig::from_file(&path).is_err());
        Ok(())
    }
}
