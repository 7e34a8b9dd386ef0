use std::fs;
use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::export::ExportFormat;

/// Environment variable naming an optional JSON config file (native only)
pub const CONFIG_ENV_VAR: &str = "SKETCH_BOARD_CONFIG";

/// Board-wide settings. Every field has a default, so a config file only
/// needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintConfig {
    /// Canvas background, also the color the eraser paints with
    pub background: [u8; 3],
    /// Initial stroke color
    pub default_color: [u8; 3],
    pub default_brush_width: u32,
    pub min_brush_width: u32,
    pub max_brush_width: u32,
    /// Maximum number of undo snapshots kept. `None` keeps all of them.
    pub history_limit: Option<usize>,
    pub export_format: ExportFormat,
    /// Where native builds write exported images
    pub export_dir: PathBuf,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            background: [255, 255, 255],
            default_color: [0, 0, 0],
            default_brush_width: 5,
            min_brush_width: 1,
            max_brush_width: 30,
            history_limit: None,
            export_format: ExportFormat::Png,
            export_dir: PathBuf::from("."),
        }
    }
}

impl PaintConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load the config named by [`CONFIG_ENV_VAR`], or the defaults when the
    /// variable is unset or the file is unusable.
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
            return Self::default();
        };

        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path);
                config
            }
            Err(err) => {
                log::error!("Ignoring config {}: {}", path, err);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_brush_width == 0 {
            return Err(ConfigError::Invalid("min_brush_width must be at least 1".into()));
        }
        if self.min_brush_width > self.max_brush_width {
            return Err(ConfigError::Invalid(format!(
                "min_brush_width {} exceeds max_brush_width {}",
                self.min_brush_width, self.max_brush_width
            )));
        }
        if !(self.min_brush_width..=self.max_brush_width).contains(&self.default_brush_width) {
            return Err(ConfigError::Invalid(format!(
                "default_brush_width {} outside {}..={}",
                self.default_brush_width, self.min_brush_width, self.max_brush_width
            )));
        }
        if self.history_limit == Some(0) {
            return Err(ConfigError::Invalid("history_limit must be at least 1".into()));
        }
        Ok(())
    }

    pub fn background_color(&self) -> Color32 {
        let [r, g, b] = self.background;
        Color32::from_rgb(r, g, b)
    }

    pub fn default_color(&self) -> Color32 {
        let [r, g, b] = self.default_color;
        Color32::from_rgb(r, g, b)
    }

    /// Clamp a requested width into the allowed slider range
    pub fn clamp_width(&self, width: u32) -> u32 {
        width.clamp(self.min_brush_width, self.max_brush_width)
    }
}
