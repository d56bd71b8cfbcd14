//! Configuration sections for the database, dashboard and API servers

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Where the review database lives
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file (`~` is expanded)
    #[serde(default = "default_database_path")]
    pub path: String,
}

fn default_database_path() -> String {
    "review-board.db".into()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl DatabaseConfig {
    /// Resolve the configured path, expanding `~` and environment variables
    pub fn resolved_path(&self) -> Result<PathBuf, ConfigError> {
        let expanded =
            shellexpand::full(&self.path).map_err(|e| ConfigError::DatabasePath {
                message: e.to_string(),
            })?;
        Ok(PathBuf::from(expanded.as_ref()))
    }
}

/// Settings for the HTML dashboard
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    /// Address the dashboard listens on
    #[serde(default = "default_dashboard_bind")]
    pub bind: String,

    /// Page title shown in the list view
    #[serde(default = "default_title")]
    pub title: String,

    /// Logo image shown in the sidebar
    pub logo_path: Option<PathBuf>,

    /// Reviewer name shown at the bottom of the sidebar
    pub peer_name: Option<String>,

    /// CSS width of the scrollable table container
    #[serde(default = "default_table_width")]
    pub table_width: String,

    /// CSS height of the scrollable table container
    #[serde(default = "default_table_height")]
    pub table_height: String,

    /// Directory of templates replacing the built-in ones
    pub templates_dir: Option<PathBuf>,
}

fn default_dashboard_bind() -> String {
    "127.0.0.1:8501".into()
}

fn default_title() -> String {
    "Automated Code Peer Review Application".into()
}

fn default_table_width() -> String {
    "100%".into()
}

fn default_table_height() -> String {
    "400px".into()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind: default_dashboard_bind(),
            title: default_title(),
            logo_path: None,
            peer_name: None,
            table_width: default_table_width(),
            table_height: default_table_height(),
            templates_dir: None,
        }
    }
}

impl DashboardConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_bind("dashboard", &self.bind)
    }

    /// Merge another dashboard section into this one (other wins when set)
    pub fn merge(&mut self, other: Self) {
        if other.bind != default_dashboard_bind() {
            self.bind = other.bind;
        }
        if other.title != default_title() {
            self.title = other.title;
        }
        if other.logo_path.is_some() {
            self.logo_path = other.logo_path;
        }
        if other.peer_name.is_some() {
            self.peer_name = other.peer_name;
        }
        if other.table_width != default_table_width() {
            self.table_width = other.table_width;
        }
        if other.table_height != default_table_height() {
            self.table_height = other.table_height;
        }
        if other.templates_dir.is_some() {
            self.templates_dir = other.templates_dir;
        }
    }
}

/// Settings for the JSON API
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Address the API listens on
    #[serde(default = "default_api_bind")]
    pub bind: String,
}

fn default_api_bind() -> String {
    "127.0.0.1:5000".into()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: default_api_bind(),
        }
    }
}

impl ApiConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_bind("api", &self.bind)
    }

    pub fn merge(&mut self, other: Self) {
        if other.bind != default_api_bind() {
            self.bind = other.bind;
        }
    }
}

impl DatabaseConfig {
    pub fn merge(&mut self, other: Self) {
        if other.path != default_database_path() {
            self.path = other.path;
        }
    }
}

fn parse_bind(section: &'static str, addr: &str) -> Result<SocketAddr, ConfigError> {
    addr.parse().map_err(|_| ConfigError::InvalidBind {
        section,
        addr: addr.to_string(),
    })
}
