//! Configuration for the `aflang` CLI.
//!
//! Layering (lowest to highest precedence): built-in defaults, TOML config
//! file, CLI flags. The config file itself is optional; its absence is not
//! an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

pub const CONFIG_FILE_NAME: &str = "aflang.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Default `tracing` filter directive, e.g. `"info"` or `"debug"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Default step budget applied when `--budget-steps` is not given.
    #[serde(default)]
    pub budget_steps: Option<u64>,

    /// Default wall-clock budget in milliseconds.
    #[serde(default)]
    pub budget_millis: Option<u64>,

    /// Path to a confusable-character equivalence table, pre-loaded for the
    /// `ccnorm`/`norm` demo registrations.
    #[serde(default)]
    pub confusable_table: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: default_log_level(),
            budget_steps: None,
            budget_millis: None,
            confusable_table: None,
        }
    }
}

impl Config {
    /// Loads from the first of: current directory, `$HOME/.config/aflang/`,
    /// the platform config directory. Falls back to defaults if none exist.
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::Config(format!("configuration file not found: {}", path.display())));
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::Config(format!("failed to parse configuration: {e}")))
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("failed to serialize configuration: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn check_current_dir_config() -> Option<PathBuf> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    fn check_home_config() -> Option<PathBuf> {
        dirs::home_dir()
            .map(|dir| dir.join(".config").join("aflang").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn check_system_config() -> Option<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("aflang").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn find_config_file() -> Option<PathBuf> {
        Self::check_current_dir_config().or_else(Self::check_home_config).or_else(Self::check_system_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_info_log_level_and_no_budget() {
        let config = Config::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.budget_steps, None);
        assert_eq!(config.budget_millis, None);
    }

    #[test]
    fn config_save_and_load_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test_config.toml");

        let original = Config {
            log_level: "debug".to_string(),
            budget_steps: Some(10_000),
            budget_millis: Some(500),
            confusable_table: Some(PathBuf::from("/etc/aflang/confusables.txt")),
        };
        original.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();
        assert_eq!(original, loaded);
    }

    #[test]
    fn load_from_nonexistent_path_is_error() {
        let result = Config::load_from_path(Path::new("/nonexistent/path/aflang.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.toml");
        std::fs::write(&config_path, "log_level = \"trace\"\n").unwrap();
        let loaded = Config::load_from_path(&config_path).unwrap();
        assert_eq!(loaded.log_level, "trace");
        assert_eq!(loaded.budget_steps, None);
    }
}
