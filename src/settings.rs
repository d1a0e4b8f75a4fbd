//! Game settings and preferences
//!
//! Persisted as JSON, separately from anything the simulation owns.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// How the player steers the car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MovementInput {
    /// Swipe left/right to change lane
    #[default]
    Gestures,
    /// Tilt the device; the tilt picks the lane
    Accelerometer,
}

impl MovementInput {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementInput::Gestures => "Gestures",
            MovementInput::Accelerometer => "Accelerometer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gestures" | "gesture" | "swipe" => Some(MovementInput::Gestures),
            "accelerometer" | "tilt" => Some(MovementInput::Accelerometer),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Selected steering mode
    pub movement_input: MovementInput,
    /// Flip the tilt axis (devices report it with opposite signs)
    pub invert_tilt: bool,
    /// Developer mode: exposes the score reset action
    pub dev_mode: bool,
    /// Game balance
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            movement_input: MovementInput::Gestures,
            invert_tilt: false,
            dev_mode: true,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.tuning = settings.tuning.validated();
        Ok(settings)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or unreadable
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(err) => {
                log::info!("Using default settings ({}: {})", path.display(), err);
                Self::default()
            }
        }
    }

    /// Save settings to `path` as pretty JSON
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = self.to_json().map_err(io::Error::other)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_input_from_str() {
        assert_eq!(MovementInput::from_str("Tilt"), Some(MovementInput::Accelerometer));
        assert_eq!(MovementInput::from_str("gestures"), Some(MovementInput::Gestures));
        assert_eq!(MovementInput::from_str("joystick"), None);
        assert_eq!(MovementInput::Accelerometer.as_str(), "Accelerometer");
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "movement_input": "Accelerometer" }"#).unwrap();
        assert_eq!(settings.movement_input, MovementInput::Accelerometer);
        assert!(settings.dev_mode);
        assert_eq!(settings.tuning, Tuning::default());
    }

    #[test]
    fn test_from_json_validates_tuning() {
        let settings = Settings::from_json(r#"{ "tuning": { "lane_count": 0 } }"#).unwrap();
        assert_eq!(settings.tuning.lane_count, 1);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Settings::from_json("not json").is_err());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let settings = Settings {
            movement_input: MovementInput::Accelerometer,
            invert_tilt: true,
            dev_mode: false,
            ..Default::default()
        };
        settings.save(&path).unwrap();

        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_load_missing_or_malformed_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert_eq!(Settings::load(&missing), Settings::default());

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ movement_input").unwrap();
        assert_eq!(Settings::load(&broken), Settings::default());
    }
}
