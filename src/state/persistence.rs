use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use egui::Color32;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{DEFAULT_HANDLE_SIZE, DEFAULT_MIN_SHAPE_SIZE};
use crate::theme::ThemeKind;

/// Errors that can occur while loading or saving settings
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize settings: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to access settings file: {0}")]
    IoError(#[from] std::io::Error),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Tunables of the editing engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub handle_size: f32,
    pub min_shape_size: f32,
    /// Side of the square eraser brush, in scene units.
    pub eraser_brush_size: f32,
    pub pen_width: f32,
    pub pen_color: Color32,
    pub wheel_zoom_factor: f32,
    pub button_zoom_in: f32,
    pub button_zoom_out: f32,
    pub brightness_range: RangeInclusive<f32>,
    pub theme: ThemeKind,
    /// User-picked canvas color; `None` follows the theme.
    pub canvas_background: Option<Color32>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            handle_size: DEFAULT_HANDLE_SIZE,
            min_shape_size: DEFAULT_MIN_SHAPE_SIZE,
            eraser_brush_size: 10.0,
            pen_width: 2.0,
            pen_color: Color32::BLACK,
            wheel_zoom_factor: 1.15,
            button_zoom_in: 1.2,
            button_zoom_out: 0.8,
            brightness_range: 0.0..=2.0,
            theme: ThemeKind::Dark,
            canvas_background: None,
        }
    }
}

/// Loads and saves [`EditorSettings`] as JSON at a fixed path.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read settings; a missing file yields the defaults.
    pub fn load(&self) -> PersistenceResult<EditorSettings> {
        if !self.path.exists() {
            info!("No settings at {}, using defaults", self.path.display());
            return Ok(EditorSettings::default());
        }
        let json = fs::read_to_string(&self.path)?;
        let settings = serde_json::from_str(&json).inspect_err(|e| {
            warn!("Settings at {} are invalid: {}", self.path.display(), e);
        })?;
        info!("Loaded settings from {}", self.path.display());
        Ok(settings)
    }

    pub fn save(&self, settings: &EditorSettings) -> PersistenceResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json)?;
        info!("Saved settings to {}", self.path.display());
        Ok(())
    }
}
