//! Configuration handling for exgen.
//! Loads the optional `exgen.json` / `exgen.yml` / `exgen.yaml` file that
//! tunes the package manager, dependencies and emitted template values.

use crate::constants::CONFIG_FILES;
use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level configuration. Every field falls back to its default when absent.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Executable used for `init -y` and `install`
    pub package_manager: String,
    /// Packages installed into every new project
    pub dependencies: Vec<String>,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub docs: DocsConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// Prefix the aggregate router is mounted under in `app.js`
    pub api_prefix: String,
}

/// Connection settings written to `config/database.js`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database name; the project name is used when unset
    pub name: Option<String>,
    pub username: String,
    pub password: String,
    pub host: String,
    pub dialect: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DocsConfig {
    pub title: String,
    pub version: String,
    /// URL path the documentation UI is served from
    pub path: String,
    pub dependencies: Vec<String>,
    /// Extra glob patterns skipped while scanning for models and routes
    pub exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package_manager: "npm".to_string(),
            dependencies: vec![
                "express".to_string(),
                "sequelize".to_string(),
                "mysql2".to_string(),
            ],
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            docs: DocsConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000, api_prefix: "/api".to_string() }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            name: None,
            username: "root".to_string(),
            password: "password".to_string(),
            host: "localhost".to_string(),
            dialect: "mysql".to_string(),
        }
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            title: "API Documentation".to_string(),
            version: "1.0.0".to_string(),
            path: "/api-docs".to_string(),
            dependencies: vec![
                "swagger-jsdoc".to_string(),
                "swagger-ui-express".to_string(),
            ],
            exclude: Vec::new(),
        }
    }
}

/// Finds the first existing configuration file in `root_dir`.
///
/// # Arguments
/// * `root_dir` - Directory to search
/// * `config_files` - Candidate file names, tried in order
///
/// # Returns
/// * `Option<PathBuf>` - Path of the first file that exists
pub fn find_config<P: AsRef<Path>>(root_dir: P, config_files: &[&str]) -> Option<PathBuf> {
    config_files
        .iter()
        .map(|file| root_dir.as_ref().join(file))
        .find(|config_path| config_path.exists())
}

/// Parses configuration content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither valid JSON nor valid YAML
pub fn parse_config(content: &str) -> Result<Config> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}"))),
    }
}

/// Loads the configuration for a command.
///
/// An explicit path must exist. Without one, `root_dir` is searched for
/// [`CONFIG_FILES`] and the defaults are used when none is present.
pub fn get_config<P: AsRef<Path>>(root_dir: P, explicit: Option<&Path>) -> Result<Config> {
    let config_path = match explicit {
        Some(path) if !path.exists() => {
            return Err(Error::ConfigError(format!(
                "configuration file '{}' does not exist",
                path.display()
            )));
        }
        Some(path) => Some(path.to_path_buf()),
        None => find_config(&root_dir, &CONFIG_FILES),
    };

    match config_path {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            parse_config(&content)
        }
        None => {
            debug!("No configuration file found (tried: {}), using defaults", CONFIG_FILES.join(", "));
            Ok(Config::default())
        }
    }
}
