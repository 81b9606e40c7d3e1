// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use grid_notify::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Point the notification region at a server
//! config.fetch_notification_url = Some("https://example.org/notifications".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("test_settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded_config.fetch_notification_url, config.fetch_notification_url);
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

pub mod defaults;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use defaults::DEFAULT_CELL_TEMPLATE;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "GridNotify";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub language: Option<String>,
    #[serde(default)]
    pub fetch_notification_url: Option<String>,
    #[serde(default)]
    pub cell_template: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Opaque options forwarded verbatim with every notification request.
    // Kept last: TOML tables must follow plain keys.
    #[serde(default)]
    pub request_options: Option<toml::Table>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            fetch_notification_url: None,
            cell_template: Some(DEFAULT_CELL_TEMPLATE.to_string()),
            request_timeout_secs: None,
            request_options: None,
        }
    }
}

impl Config {
    /// Returns the cell template, falling back to the built-in one.
    #[must_use]
    pub fn cell_template(&self) -> &str {
        self.cell_template.as_deref().unwrap_or(DEFAULT_CELL_TEMPLATE)
    }

    /// Returns the request options as JSON, `null` when none are configured.
    pub fn request_options_json(&self) -> Result<serde_json::Value> {
        match &self.request_options {
            Some(table) => Ok(serde_json::to_value(table)?),
            None => Ok(serde_json::Value::Null),
        }
    }

    /// Returns the request timeout clamped to the accepted range.
    ///
    /// `None` means requests never time out.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(|secs| {
            Duration::from_secs(secs.clamp(
                defaults::MIN_REQUEST_TIMEOUT_SECS,
                defaults::MAX_REQUEST_TIMEOUT_SECS,
            ))
        })
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid settings file, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
