//! Configuration loading with multi-layer merge

use super::error::ConfigError;
use super::{ApiConfig, DashboardConfig, DatabaseConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding `[database] path`
pub const DATABASE_ENV: &str = "REVIEW_BOARD_DATABASE";

/// Top-level review-board configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReviewBoardConfig {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub api: ApiConfig,
}

impl ReviewBoardConfig {
    /// Load configuration from the standard hierarchy
    ///
    /// Load order (later overrides earlier):
    /// 1. Built-in defaults
    /// 2. ~/.config/review-board/config.toml
    /// 3. ./review-board.toml (project)
    /// 4. Explicit `--config` file
    /// 5. `REVIEW_BOARD_DATABASE`
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                config.merge(Self::load_file(&user_config_path)?);
            }
        }

        let project_config_path = PathBuf::from("review-board.toml");
        if project_config_path.exists() {
            config.merge(Self::load_file(&project_config_path)?);
        }

        if let Some(path) = explicit {
            config.merge(Self::load_file(path)?);
        }

        if let Ok(path) = std::env::var(DATABASE_ENV) {
            if !path.is_empty() {
                tracing::debug!(path = %path, "database path taken from environment");
                config.database.path = path;
            }
        }

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get the user config path (~/.config/review-board/config.toml)
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("review-board/config.toml"))
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Self) {
        self.database.merge(other.database);
        self.dashboard.merge(other.dashboard);
        self.api.merge(other.api);
    }
}
