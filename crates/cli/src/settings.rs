use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use face_overlay_core::projection::domain::preview_geometry::{Rotation, VideoGravity};
use face_overlay_core::shared::constants::DEFAULT_LOG_EVERY;

/// Persisted preview defaults. Command-line flags take precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub layer_width: f64,
    pub layer_height: f64,
    pub gravity: VideoGravity,
    pub rotation: Rotation,
    pub mirrored: bool,
    pub log_every: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layer_width: 390.0,
            layer_height: 844.0,
            gravity: VideoGravity::ResizeAspectFill,
            rotation: Rotation::R0,
            mirrored: false,
            log_every: DEFAULT_LOG_EVERY,
        }
    }
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("FaceOverlay").join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Reads settings from `path`, falling back to defaults if the file is
    /// missing or malformed.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring malformed settings {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }
}
