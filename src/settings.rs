//! Game settings and preferences
//!
//! Read from an optional JSON file in the working directory.
//! Missing fields fall back to their defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_SIZE, GAME_TICK_INTERVAL_MS, MOVE_STEP};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Clock period in milliseconds
    pub tick_interval_ms: u64,
    /// Distance of one hop
    pub move_step: f32,
    /// Show the session best line on the HUD
    pub show_session_best: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: GAME_TICK_INTERVAL_MS,
            move_step: MOVE_STEP,
            show_session_best: true,
        }
    }
}

impl Settings {
    /// Settings file looked up in the working directory
    const FILE_NAME: &'static str = "frog_crossing.json";
    /// Environment override for the settings path
    pub const PATH_ENV: &'static str = "FROG_CROSSING_SETTINGS";

    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Clock period, never shorter than one millisecond
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// Hop distance. The wrap corrects by one canvas width at most, so a step
    /// outside `(0, CANVAS_SIZE)` falls back to the default.
    pub fn move_step(&self) -> f32 {
        let step = self.move_step;
        if step.is_finite() && step > 0.0 && step < CANVAS_SIZE {
            step
        } else {
            log::warn!("Move step {} out of range, using {}", step, MOVE_STEP);
            MOVE_STEP
        }
    }

    /// Where settings are read from
    pub fn path() -> PathBuf {
        std::env::var_os(Self::PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::FILE_NAME))
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from the default location
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }
}
