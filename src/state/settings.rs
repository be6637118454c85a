/// Startup settings for the board
///
/// Settings are read once at launch from a JSON file in the user's
/// config directory. The file is optional and never written by the app;
/// any field left out takes its default value.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use super::catalog::DEFAULT_MAX_RECORDS;
use super::view::Density;

/// Errors raised while reading the settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// All tunable parameters of the board
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Settings {
    // ========== Infinite scroll ==========

    /// Number of synthetic pins appended per scroll-triggered batch (1 to 60)
    pub batch_size: usize,

    /// Hard cap on the number of pins the board holds (at least 8)
    /// - Batches stop appending once the cap is reached
    /// - Manual adds are never refused
    pub max_records: usize,

    /// Distance from the bottom of the grid, in pixels, that triggers a batch
    pub scroll_threshold: f32,

    /// Minimum time between two batches, in milliseconds
    pub load_cooldown_ms: u64,

    /// Seed for shuffle and synthetic pins
    /// - `None` seeds from the OS on every launch
    /// - A fixed value makes the board reproducible (demos, bug reports)
    pub seed: Option<u64>,

    // ========== Appearance ==========

    /// Initial grid density (cards per row)
    pub density: Density,

    /// Start in dark mode
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            batch_size: 12,
            max_records: DEFAULT_MAX_RECORDS,
            scroll_threshold: 100.0,
            load_cooldown_ms: 400,
            seed: None,
            density: Density::Normal,
            dark_mode: false,
        }
    }
}

impl Settings {
    /// Parse from a JSON string, clamping values into their valid ranges
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.clamped())
    }

    /// Load settings from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(json) => Ok(Self::from_json(&json)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Load from the default location, falling back to defaults on any error
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            tracing::warn!("no config directory available, using default settings");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(settings) => {
                tracing::info!(path = %path.display(), "settings loaded");
                settings
            }
            Err(err) => {
                tracing::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }

    /// Where the settings file lives:
    /// - Linux: ~/.config/pinboard/settings.json
    /// - macOS: ~/Library/Application Support/pinboard/settings.json
    /// - Windows: %APPDATA%\pinboard\settings.json
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("pinboard");
        path.push("settings.json");
        Some(path)
    }

    pub fn load_cooldown(&self) -> Duration {
        Duration::from_millis(self.load_cooldown_ms)
    }

    fn clamped(mut self) -> Self {
        self.batch_size = self.batch_size.clamp(1, 60);
        self.max_records = self.max_records.max(8);
        if !self.scroll_threshold.is_finite() || self.scroll_threshold < 0.0 {
            self.scroll_threshold = Self::default().scroll_threshold;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings = Settings::from_json(r#"{ "dark_mode": true, "seed": 17 }"#).unwrap();
        assert!(settings.dark_mode);
        assert_eq!(settings.seed, Some(17));
        assert_eq!(settings.batch_size, Settings::default().batch_size);
        assert_eq!(settings.density, Density::Normal);
    }

    #[test]
    fn test_values_are_clamped() {
        let settings = Settings::from_json(
            r#"{ "batch_size": 0, "max_records": 2, "scroll_threshold": -5.0, "density": "compact" }"#,
        )
        .unwrap();
        assert_eq!(settings.batch_size, 1);
        assert_eq!(settings.max_records, 8);
        assert_eq!(settings.scroll_threshold, 100.0);
        assert_eq!(settings.density, Density::Compact);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Settings::from_json("{ batch_size: ").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("pinboard-no-such-dir/settings.json");
        assert_eq!(Settings::load_from(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("pinboard-settings-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "batch_size": 24, "density": "large" }"#).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.batch_size, 24);
        assert_eq!(settings.density, Density::Large);
    }
}
