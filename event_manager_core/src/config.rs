use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

pub const DEFAULT_CONFIG_FILE: &str = "event_manager.json";
pub const ENV_CONFIG: &str = "EVENT_MANAGER_CONFIG";
pub const ENV_DB: &str = "EVENT_MANAGER_DB";
pub const ENV_LOG: &str = "EVENT_MANAGER_LOG";

/// Startup settings for the console tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite file holding the event tables.
    pub database_path: PathBuf,
    /// `tracing` filter directive, e.g. `warn` or `event_manager_core=debug`.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("data.sqlite"),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Loads settings from a JSON file. A missing or blank file yields defaults.
    pub fn load_from_path(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| CoreError::Config(format!("Failed to read {}: {e}", path.display())))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&content)
            .map_err(|e| CoreError::Config(format!("Malformed config JSON in {}: {e}", path.display())))
    }

    /// Applies overrides from an environment lookup.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(db) = lookup(ENV_DB).filter(|v| !v.trim().is_empty()) {
            self.database_path = PathBuf::from(db);
        }
        if let Some(level) = lookup(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            self.log_level = level;
        }
        self
    }

    /// Resolves the full configuration: defaults, then the config file, then
    /// environment, then an explicit database path argument.
    pub fn resolve(
        lookup: impl Fn(&str) -> Option<String>,
        db_path_arg: Option<PathBuf>,
    ) -> CoreResult<Self> {
        let file = lookup(ENV_CONFIG)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        let mut config = Self::load_from_path(&file)?.with_env(lookup);
        if let Some(path) = db_path_arg {
            config.database_path = path;
        }
        Ok(config)
    }

    /// Resolves against the process environment.
    pub fn from_env(db_path_arg: Option<PathBuf>) -> CoreResult<Self> {
        Self::resolve(|key| std::env::var(key).ok(), db_path_arg)
    }
}
