//! Persisted game settings
//!
//! Options live in `options.toml` inside the per-user directory. A missing
//! or unreadable file falls back to defaults so a fresh install (or a
//! machine without a resolvable user directory) still starts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError};

/// File name of the persisted settings inside the user directory
pub const SETTINGS_FILE: &str = "options.toml";

/// Top-level game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Graphics settings
    pub graphics: GraphicsSettings,

    /// Board presentation settings
    pub board: BoardSettings,

    /// Audio settings
    pub audio: AudioSettings,
}

/// Graphics settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphicsSettings {
    /// Window width
    pub window_width: u32,

    /// Window height
    pub window_height: u32,

    /// Fullscreen mode
    pub fullscreen: bool,

    /// Point size for menu and HUD text
    pub text_size: f32,
}

/// Board presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSettings {
    /// Board theme name (resolved against the data directory)
    pub theme: String,

    /// Piece set name (resolved against the data directory)
    pub piece_set: String,

    /// Draw file/rank labels along the board edge
    pub show_coordinates: bool,
}

/// Audio settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    /// Sound effect volume (0.0 - 1.0)
    pub sound_volume: f32,

    /// Audio enabled
    pub enabled: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            graphics: GraphicsSettings {
                window_width: 640,
                window_height: 480,
                fullscreen: false,
                text_size: 24.0,
            },
            board: BoardSettings {
                theme: "wood".to_string(),
                piece_set: "classic".to_string(),
                show_coordinates: true,
            },
            audio: AudioSettings {
                music_volume: 1.0,
                sound_volume: 1.0,
                enabled: true,
            },
        }
    }
}

impl Config for GameSettings {}

/// Load settings from the user directory, falling back to defaults
///
/// Any failure (missing file, unreadable file, parse error) is logged and
/// answered with [`GameSettings::default`]; user configuration is never a
/// startup-fatal concern.
pub fn load_or_default(user_dir: &Path) -> GameSettings {
    let path = user_dir.join(SETTINGS_FILE);

    match GameSettings::load_from_file(&path) {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!(
                "Failed to load settings from {}: {} - using defaults",
                path.display(),
                err
            );
            GameSettings::default()
        }
    }
}

/// Persist settings into the user directory
pub fn save(settings: &GameSettings, user_dir: &Path) -> Result<(), ConfigError> {
    settings.save_to_file(&user_dir.join(SETTINGS_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let tmp = tempfile::tempdir().unwrap();

        let settings = load_or_default(tmp.path());
        assert_eq!(settings, GameSettings::default());
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(SETTINGS_FILE), "not valid toml [").unwrap();

        let settings = load_or_default(tmp.path());
        assert_eq!(settings, GameSettings::default());
    }

    #[test]
    fn test_saved_settings_round_trip() {
        let tmp = tempfile::tempdir().unwrap();

        let mut settings = GameSettings::default();
        settings.graphics.fullscreen = true;
        settings.board.theme = "marble".to_string();
        settings.audio.music_volume = 0.25;

        save(&settings, tmp.path()).unwrap();
        let loaded = load_or_default(tmp.path());
        assert_eq!(loaded, settings);
    }
}
