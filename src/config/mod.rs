// SPDX-License-Identifier: MPL-2.0
//! This module handles the notice system's configuration, including loading
//! and saving user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use aura_notify::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Keep notices on screen until they are dismissed
//! config.auto_close_ms = Some(0);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

use crate::domain::diagnostics::HistoryCapacity;
use crate::domain::notice::AutoClose;
use crate::error::Result;
use crate::notice::{NoticeDefaults, OverlayTiming};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use defaults::{
    DEFAULT_ANIMATION, DEFAULT_AUTO_CLOSE_MS, DEFAULT_DIAGNOSTICS_CAPACITY,
    DEFAULT_ENTER_ANIMATION_MS, DEFAULT_EXIT_ANIMATION_MS, MAX_ANIMATION_MS,
};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "AuraNotify";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Auto-close delay applied when a notice does not choose one.
    #[serde(default)]
    pub auto_close_ms: Option<i64>,
    /// Entrance animation applied when a notice does not choose one.
    #[serde(default)]
    pub animation: Option<bool>,
    #[serde(default)]
    pub enter_animation_ms: Option<u64>,
    #[serde(default)]
    pub exit_animation_ms: Option<u64>,
    #[serde(default)]
    pub diagnostics_capacity: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto_close_ms: Some(DEFAULT_AUTO_CLOSE_MS),
            animation: Some(DEFAULT_ANIMATION),
            enter_animation_ms: Some(DEFAULT_ENTER_ANIMATION_MS),
            exit_animation_ms: Some(DEFAULT_EXIT_ANIMATION_MS),
            diagnostics_capacity: Some(DEFAULT_DIAGNOSTICS_CAPACITY),
        }
    }
}

impl Config {
    /// Fallbacks the manager applies to options left unset.
    #[must_use]
    pub fn notice_defaults(&self) -> NoticeDefaults {
        NoticeDefaults {
            auto_close: AutoClose::from_millis(self.auto_close_ms.unwrap_or(DEFAULT_AUTO_CLOSE_MS)),
            animation: self.animation.unwrap_or(DEFAULT_ANIMATION),
        }
    }

    /// Animation lengths for the bundled headless overlay.
    #[must_use]
    pub fn overlay_timing(&self) -> OverlayTiming {
        let clamp = |ms: Option<u64>, default: u64| {
            Duration::from_millis(ms.unwrap_or(default).min(MAX_ANIMATION_MS))
        };
        OverlayTiming {
            enter: clamp(self.enter_animation_ms, DEFAULT_ENTER_ANIMATION_MS),
            exit: clamp(self.exit_animation_ms, DEFAULT_EXIT_ANIMATION_MS),
        }
    }

    #[must_use]
    pub fn diagnostics_capacity(&self) -> HistoryCapacity {
        HistoryCapacity::new(
            self.diagnostics_capacity
                .unwrap_or(DEFAULT_DIAGNOSTICS_CAPACITY),
        )
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

/// Reads a configuration file. Content that does not parse yields the
/// defaults; only I/O failures are reported.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "ignoring unreadable notice settings");
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

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_fields() {
        let config = Config {
            auto_close_ms: Some(1500),
            animation: Some(false),
            enter_animation_ms: Some(120),
            exit_animation_ms: Some(80),
            diagnostics_capacity: Some(300),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn load_from_path_reports_missing_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = load_from_path(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn partial_file_leaves_other_fields_unset() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "auto_close_ms = 0\n").expect("failed to write toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded.auto_close_ms, Some(0));
        assert_eq!(loaded.animation, None);
        assert_eq!(loaded.notice_defaults().auto_close, AutoClose::Never);
        assert!(loaded.notice_defaults().animation);
    }

    #[test]
    fn default_config_matches_documented_defaults() {
        let defaults = Config::default().notice_defaults();
        assert_eq!(defaults.auto_close.duration(), Some(Duration::from_secs(5)));
        assert!(defaults.animation);
    }

    #[test]
    fn overlay_timing_is_clamped() {
        let config = Config {
            exit_animation_ms: Some(60_000),
            ..Config::default()
        };
        let timing = config.overlay_timing();
        assert_eq!(timing.enter, Duration::from_millis(DEFAULT_ENTER_ANIMATION_MS));
        assert_eq!(timing.exit, Duration::from_millis(MAX_ANIMATION_MS));
    }

    #[test]
    fn diagnostics_capacity_is_clamped() {
        let config = Config {
            diagnostics_capacity: Some(1),
            ..Config::default()
        };
        assert_eq!(
            config.diagnostics_capacity().value(),
            defaults::MIN_DIAGNOSTICS_CAPACITY
        );
    }
}
