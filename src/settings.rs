//! Harness settings
//!
//! Read from the path given on the command line, or from
//! `~/.config/stride/settings.toml` when none is given.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stride_core::TimeConfig;
use stride_game::MovementConfig;
use tracing::{info, warn};

/// All harness settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StrideSettings {
    pub movement: MovementConfig,
    pub time: TimeConfig,
    pub harness: HarnessSettings,
}

impl StrideSettings {
    /// Get the default settings file path
    fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("stride").join("settings.toml"))
    }

    /// Load settings from `path` (or the default location), falling back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::settings_path) else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }
}

/// Scripted run parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessSettings {
    /// Simulated host frame rate
    pub frame_rate: f32,
    /// Camera yaw in degrees applied to all movement
    pub camera_yaw_degrees: f32,
    /// Height the character spawns at
    pub spawn_height: f32,
}

impl Default for HarnessSettings {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            camera_yaw_degrees: 0.0,
            spawn_height: 0.5,
        }
    }
}
