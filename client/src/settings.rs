//! Input settings persisted next to the executable as RON.
//!
//! Missing or unparseable files fall back to defaults; a fresh default file
//! is written on first run so players have something to edit.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use shared::MOUSE_SENSITIVITY;
use std::fs;
use std::path::PathBuf;

const SETTINGS_FILE: &str = "voxelstorm_settings.ron";

/// Controls and sensitivity (adjustable by editing the settings file).
#[derive(Resource, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct InputSettings {
    pub mouse_sensitivity: f32,
    pub invert_y: bool,
    /// Tap Shift to toggle sprint instead of holding it.
    pub sprint_toggle: bool,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            mouse_sensitivity: MOUSE_SENSITIVITY,
            invert_y: false,
            sprint_toggle: false,
        }
    }
}

fn settings_path() -> PathBuf {
    // Next to the executable for bundled builds, cwd during development.
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(SETTINGS_FILE)))
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
}

/// Load settings, writing a default file if none exists yet.
pub fn load_or_default() -> InputSettings {
    let path = settings_path();
    match fs::read_to_string(&path) {
        Ok(text) => match ron::from_str(&text) {
            Ok(settings) => {
                info!("Loaded input settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {e}; using defaults", path);
                InputSettings::default()
            }
        },
        Err(_) => {
            let settings = InputSettings::default();
            match ron::ser::to_string_pretty(&settings, ron::ser::PrettyConfig::default()) {
                Ok(text) => {
                    if let Err(e) = fs::write(&path, text) {
                        warn!("Failed to write default settings to {:?}: {e}", path);
                    } else {
                        info!("Wrote default input settings to {:?}", path);
                    }
                }
                Err(e) => warn!("Failed to serialize default settings: {e}"),
            }
            settings
        }
    }
}
