//! Host settings for the headless runner
//!
//! Stored as JSON. Every field has a default, so partial files are fine.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_FRAME_DELTA;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; derived from the clock when absent
    pub seed: Option<u64>,
    /// Simulated frame length in seconds
    pub frame_delta: f32,
    /// Per-frame delta cap handed to `Game::set_max_frame_delta`
    pub max_frame_delta: f32,
    /// Longest simulated run before the runner stops
    pub run_seconds: f32,
    /// Where the best score lives
    pub storage_path: String,
    /// Let the bot steer
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            frame_delta: 1.0 / 60.0,
            max_frame_delta: MAX_FRAME_DELTA,
            run_seconds: 120.0,
            storage_path: "lane-runner-store.json".to_string(),
            autopilot: true,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str::<Settings>(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Bad settings file {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Replace nonsensical timing values with defaults
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.frame_delta.is_finite() && self.frame_delta > 0.0) {
            self.frame_delta = defaults.frame_delta;
        }
        if !(self.max_frame_delta.is_finite() && self.max_frame_delta > 0.0) {
            self.max_frame_delta = defaults.max_frame_delta;
        }
        if !(self.run_seconds.is_finite() && self.run_seconds >= 0.0) {
            self.run_seconds = defaults.run_seconds;
        }
        self
    }
}
