//! Startup settings, read from `settings.json` in the config directory.

use crate::main_window::PEN_WIDTH_RANGE;
use easycore::storage::{self, StorageError};
use egui::Color32;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "easypaint";
const FILE_NAME: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintSettings {
    /// Start full screen.
    pub fullscreen: bool,
    /// Initial pen color, RGB.
    pub pen_color: [u8; 3],
    pub pen_width: u32,
    /// Slack added each time the canvas grows to fit the window.
    pub canvas_margin: u32,
}

impl Default for PaintSettings {
    fn default() -> Self {
        Self {
            fullscreen: true,
            pen_color: [0, 0, 255],
            pen_width: 1,
            canvas_margin: 128,
        }
    }
}

impl PaintSettings {
    pub fn path() -> PathBuf {
        storage::config_dir(APP_NAME).join(FILE_NAME)
    }

    pub fn load_from(path: &Path) -> storage::Result<Self> {
        let mut settings: Self = storage::load_json(path)?;
        settings.pen_width = settings.pen_width.clamp(*PEN_WIDTH_RANGE.start(), *PEN_WIDTH_RANGE.end());
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> storage::Result<()> {
        storage::save_json(self, path)
    }

    /// Load settings, writing the defaults out on first run. A broken file
    /// is left alone and the defaults are used.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(StorageError::NotFound(_)) => {
                let settings = Self::default();
                if let Err(e) = settings.save_to(path) {
                    log::warn!("could not write default settings to {}: {}", path.display(), e);
                }
                settings
            }
            Err(e) => {
                log::warn!("ignoring settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn pen_color32(&self) -> Color32 {
        let [r, g, b] = self.pen_color;
        Color32::from_rgb(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_run_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("easypaint").join(FILE_NAME);
        let settings = PaintSettings::load_or_default(&path);
        assert_eq!(settings, PaintSettings::default());
        assert!(path.exists());
        assert_eq!(PaintSettings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_roundtrip_and_clamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        let custom = PaintSettings {
            fullscreen: false,
            pen_color: [10, 20, 30],
            pen_width: 7,
            canvas_margin: 0,
        };
        custom.save_to(&path).unwrap();
        assert_eq!(PaintSettings::load_or_default(&path), custom);

        std::fs::write(&path, r#"{ "pen_width": 500 }"#).unwrap();
        let loaded = PaintSettings::load_from(&path).unwrap();
        assert_eq!(loaded.pen_width, 50);
        assert!(loaded.fullscreen);
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        std::fs::write(&path, "pen_width = 3").unwrap();
        assert!(matches!(PaintSettings::load_from(&path), Err(StorageError::Json(_))));
        assert_eq!(PaintSettings::load_or_default(&path), PaintSettings::default());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "pen_width = 3");
    }

    #[test]
    fn test_pen_color32() {
        let settings = PaintSettings::default();
        assert_eq!(settings.pen_color32(), Color32::from_rgb(0, 0, 255));
    }
}
