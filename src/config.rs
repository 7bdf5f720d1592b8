//! Configuration loading.
//!
//! Configuration is a small YAML file resolved in priority order: an explicit
//! `--config` path, the `TODO_RANK_CONFIG` environment variable, a
//! `todo-rank.yaml` in the working directory, then the user config directory.
//! A missing file falls back to built-in defaults. Scoring constants are not
//! configurable here; they are fixed policy in [`crate::score::ScoreConfig`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default port for the HTTP API server.
pub const DEFAULT_PORT: u16 = 3000;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
}

/// Server and storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Port for the HTTP API server (default: 3000).
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("todo-rank").join("todo.sqlite3"))
        .unwrap_or_else(|| PathBuf::from("todo.sqlite3"))
}

impl Config {
    /// Load configuration, trying each source in priority order.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()));
        }

        if let Ok(path) = std::env::var("TODO_RANK_CONFIG") {
            return Self::from_file(Path::new(&path))
                .with_context(|| format!("Failed to load config from {}", path));
        }

        for candidate in Self::candidate_paths() {
            if candidate.exists() {
                match Self::from_file(&candidate) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        warn!(
                            "Ignoring unreadable config {}: {}",
                            candidate.display(),
                            e
                        );
                    }
                }
            }
        }

        Ok(Self::default())
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("todo-rank.yaml")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("todo-rank").join("config.yaml"));
        }
        paths
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Create the database file's parent directory if needed.
    pub fn ensure_db_dir(&self) -> Result<()> {
        if let Some(parent) = self.server.db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory {}", parent.display())
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_sections() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert!(config.server.db_path.ends_with("todo.sqlite3"));
    }

    #[test]
    fn partial_server_section_keeps_other_defaults() {
        let config: Config = serde_yaml::from_str("server:\n  port: 8080\n").unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(config.server.db_path.ends_with("todo.sqlite3"));
    }
}
