//! Game settings
//!
//! Loaded from a JSON file at startup. Every field has a default, so a
//! partial file or no file at all is fine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::entities::Field;

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "INVADERS_SETTINGS";
/// Settings file looked up in the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "invaders.json";

// Smaller fields are replaced by the defaults
const MIN_FIELD_WIDTH: f32 = 400.0;
const MIN_FIELD_HEIGHT: f32 = 400.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play-field width in simulation units
    pub field_width: f32,
    /// Play-field height in simulation units
    pub field_height: f32,
    /// Simulation ticks per second
    pub tick_rate: u32,
    pub high_score_path: PathBuf,
    pub log_path: PathBuf,
    /// Directory holding optional `gameover.wav` / `levelup.wav`
    pub sounds_dir: PathBuf,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: Field::DEFAULT_WIDTH,
            field_height: Field::DEFAULT_HEIGHT,
            tick_rate: 60,
            high_score_path: PathBuf::from("invaders-highscore.json"),
            log_path: PathBuf::from("invaders.log"),
            sounds_dir: PathBuf::from("assets/sounds"),
            sfx_volume: 0.5,
            muted: false,
            seed: None,
        }
    }
}

/// Where the settings came from. Settings are read before the logger
/// exists, so the outcome is kept and logged afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsOrigin {
    File(PathBuf),
    Missing(PathBuf),
    Invalid { path: PathBuf, error: String },
}

impl SettingsOrigin {
    pub fn log(&self) {
        match self {
            SettingsOrigin::File(path) => log::info!("Loaded settings from {}", path.display()),
            SettingsOrigin::Missing(path) => {
                log::info!("No settings at {}, using defaults", path.display())
            }
            SettingsOrigin::Invalid { path, error } => {
                log::warn!("Ignoring invalid settings in {}: {error}", path.display())
            }
        }
    }
}

impl Settings {
    /// Load from `$INVADERS_SETTINGS`, else `invaders.json`, else defaults
    pub fn load() -> (Self, SettingsOrigin) {
        let path = std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));
        Self::load_from(&path)
    }

    /// Load from a file, falling back to defaults when it is missing or invalid
    pub fn load_from(path: &Path) -> (Self, SettingsOrigin) {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => return (Self::default(), SettingsOrigin::Missing(path.to_path_buf())),
        };

        match serde_json::from_str::<Settings>(&json) {
            Ok(settings) => (settings.sanitized(), SettingsOrigin::File(path.to_path_buf())),
            Err(err) => (
                Self::default(),
                SettingsOrigin::Invalid {
                    path: path.to_path_buf(),
                    error: err.to_string(),
                },
            ),
        }
    }

    /// Replace values the game cannot run with
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.field_width.is_finite() || self.field_width < MIN_FIELD_WIDTH {
            self.field_width = defaults.field_width;
        }
        if !self.field_height.is_finite() || self.field_height < MIN_FIELD_HEIGHT {
            self.field_height = defaults.field_height;
        }
        if self.tick_rate == 0 {
            self.tick_rate = defaults.tick_rate;
        }
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }

    pub fn field(&self) -> Field {
        Field::new(self.field_width, self.field_height)
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }

    pub fn volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.sfx_volume }
    }
}
