//! Game settings and preferences
//!
//! Read from a JSON file (`flappy_ghost.json`, or the path in
//! `FLAPPY_GHOST_CONFIG`). Every field is optional; anything missing or
//! broken falls back to the defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the settings file
pub const CONFIG_ENV_VAR: &str = "FLAPPY_GHOST_CONFIG";
/// Settings file used when the variable is unset
pub const DEFAULT_CONFIG_PATH: &str = "flappy_ghost.json";

/// Why a settings file couldn't be used
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Files ===
    /// Plain-text high score file
    pub high_score_path: PathBuf,
    /// Log output (the terminal is busy drawing the game)
    pub log_path: PathBuf,

    // === Timing ===
    /// Simulation/presentation rate
    pub target_fps: u32,
    /// Pipe RNG seed; derived from the clock when absent
    pub seed: Option<u64>,

    // === Input ===
    /// Frames a key stays held after its last press/repeat event
    pub hold_window_frames: u64,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            high_score_path: PathBuf::from("highscore.txt"),
            log_path: PathBuf::from("flappy_ghost.log"),

            target_fps: crate::consts::TICK_RATE,
            seed: None,

            hold_window_frames: 4,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Settings file location from the environment
    pub fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Strict load: missing file is `Ok(None)`, anything else wrong is an error
    pub fn from_file(path: &Path) -> Result<Option<Self>, SettingsError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let settings: Settings =
            serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Some(settings.sanitized()))
    }

    /// Lenient load used at startup: always yields usable settings
    ///
    /// Runs before the logger exists (the log path is a setting), so a
    /// broken file is handed back next to the defaults for the caller to
    /// report once logging is up.
    pub fn load(path: &Path) -> (Self, Option<SettingsError>) {
        match Self::from_file(path) {
            Ok(Some(settings)) => (settings, None),
            Ok(None) => (Self::default(), None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Clamp values into their usable ranges
    pub fn sanitized(mut self) -> Self {
        self.target_fps = self.target_fps.clamp(1, 240);
        self.hold_window_frames = self.hold_window_frames.max(1);
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::testutil::scratch_path;

    fn write(path: &Path, text: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = scratch_path("flappy_ghost.json");
        assert!(Settings::from_file(&path).unwrap().is_none());
        let (settings, problem) = Settings::load(&path);
        assert_eq!(settings, Settings::default());
        assert!(problem.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = scratch_path("flappy_ghost.json");
        write(&path, r#"{ "seed": 77, "muted": true, "unknown_field": 1 }"#);
        let (settings, problem) = Settings::load(&path);
        assert!(problem.is_none());
        assert_eq!(settings.seed, Some(77));
        assert!(settings.muted);
        assert_eq!(settings.target_fps, 60);
        assert_eq!(settings.high_score_path, PathBuf::from("highscore.txt"));
    }

    #[test]
    fn test_malformed_file_is_an_error_but_load_recovers() {
        let path = scratch_path("flappy_ghost.json");
        write(&path, "{ not json");
        assert!(matches!(
            Settings::from_file(&path),
            Err(SettingsError::Parse { .. })
        ));
        let (settings, problem) = Settings::load(&path);
        assert_eq!(settings, Settings::default());
        let problem = problem.unwrap();
        assert!(matches!(problem, SettingsError::Parse { .. }));
        assert!(problem.to_string().contains("flappy_ghost.json"));
    }

    #[test]
    fn test_values_are_clamped() {
        let path = scratch_path("flappy_ghost.json");
        write(
            &path,
            r#"{ "target_fps": 0, "master_volume": 3.5, "sfx_volume": -1.0, "hold_window_frames": 0 }"#,
        );
        let (settings, _) = Settings::load(&path);
        assert_eq!(settings.target_fps, 1);
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
        assert_eq!(settings.hold_window_frames, 1);
    }

    #[test]
    fn test_round_trips_through_json() {
        let settings = Settings {
            seed: Some(5),
            music_volume: 0.25,
            ..Settings::default()
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
