// SPDX-License-Identifier: MPL-2.0
//! This module handles the toaster configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use toastkit::config::{self, Config};
//! use toastkit::notifications::Position;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.position = Some(Position::BottomCenter);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::diagnostics::EventLogCapacity;
use crate::domain::notifications::DefaultDuration;
use crate::error::Result;
use crate::notifications::{Position, ToasterConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "toastkit";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub default_duration_ms: Option<u64>,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub diagnostics_capacity: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_duration_ms: Some(DEFAULT_DURATION_MS),
            position: Some(Position::default()),
            diagnostics_capacity: Some(DEFAULT_EVENT_LOG_CAPACITY),
        }
    }
}

impl Config {
    /// Builds the runtime toaster configuration, clamping out-of-range values.
    #[must_use]
    pub fn toaster_config(&self) -> ToasterConfig {
        ToasterConfig {
            default_duration: self
                .default_duration_ms
                .map(DefaultDuration::from_millis)
                .unwrap_or_default(),
            position: self.position.unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn event_log_capacity(&self) -> EventLogCapacity {
        self.diagnostics_capacity
            .map(EventLogCapacity::new)
            .unwrap_or_default()
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

/// Reads a settings file. Unparseable content falls back to defaults.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "invalid settings file, using defaults");
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
