//! Application configuration.
//!
//! Configuration is stored as JSON or TOML (chosen by file extension) in the
//! platform config directory, and is validated on every load and save.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use vecsketch_core::FontSpec;

use crate::error::{SettingsError, SettingsResult};

/// Name of the application's config directory.
const APP_DIR: &str = "vecsketch";
/// File name of the default config file.
const CONFIG_FILE: &str = "config.json";
/// Maximum number of remembered drawings.
pub const MAX_RECENT_FILES: usize = 10;

/// Drawing tool defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Stroke width for new lines and shapes
    pub line_width: f64,
    /// Half-size of the square the eraser clears around the pointer
    pub eraser_size: f64,
    /// Color of freehand strokes
    pub stroke_color: String,
    /// Fill of committed circles, rectangles, triangles and polygons
    pub shape_fill: String,
    /// Colors offered for recoloring a selection
    pub palette: Vec<String>,
    /// Font used for new text
    pub font: FontSpec,
    /// Half-size of the pick box used when clicking on objects
    pub pick_tolerance: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            eraser_size: 10.0,
            stroke_color: "black".to_string(),
            shape_fill: "black".to_string(),
            palette: ["black", "red", "green", "blue", "yellow"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            font: FontSpec::default(),
            pick_tolerance: 1.0,
        }
    }
}

/// Canvas window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub width: u32,
    pub height: u32,
    pub background: String,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 900,
            height: 400,
            background: "white".to_string(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub editor: EditorSettings,
    pub canvas: CanvasSettings,
    /// Most recently opened or saved drawings, newest first
    pub recent_files: Vec<PathBuf>,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Loads the config at `path`, falling back to defaults when the file
    /// does not exist or cannot be used.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring unusable configuration");
                Self::default()
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let editor = &self.editor;
        if !(editor.line_width.is_finite() && editor.line_width > 0.0) {
            return Err(SettingsError::invalid(
                "editor.line_width",
                format!("must be > 0, got {}", editor.line_width),
            ));
        }
        if !(editor.eraser_size.is_finite() && editor.eraser_size >= 0.0) {
            return Err(SettingsError::invalid(
                "editor.eraser_size",
                format!("must be >= 0, got {}", editor.eraser_size),
            ));
        }
        if !(editor.pick_tolerance.is_finite() && editor.pick_tolerance >= 0.0) {
            return Err(SettingsError::invalid(
                "editor.pick_tolerance",
                format!("must be >= 0, got {}", editor.pick_tolerance),
            ));
        }
        if editor.palette.is_empty() {
            return Err(SettingsError::invalid(
                "editor.palette",
                "must list at least one color",
            ));
        }
        if !(editor.font.size.is_finite() && editor.font.size > 0.0) {
            return Err(SettingsError::invalid(
                "editor.font.size",
                format!("must be > 0, got {}", editor.font.size),
            ));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(SettingsError::invalid(
                "canvas",
                format!(
                    "size must be non-zero, got {}x{}",
                    self.canvas.width, self.canvas.height
                ),
            ));
        }
        Ok(())
    }

    /// Moves `path` to the front of the recent files list.
    pub fn add_recent_file(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.recent_files.retain(|p| p != &path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(MAX_RECENT_FILES);
    }

    /// The most recently used drawing, if any.
    pub fn last_file(&self) -> Option<&Path> {
        self.recent_files.first().map(PathBuf::as_path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(SettingsError::UnsupportedFormat(format!(
                "{} (config file must be .json or .toml)",
                path.display()
            ))),
        }
    }
}

/// Directory holding the application's configuration.
pub fn config_dir() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| SettingsError::ConfigDirectory("no platform config directory".to_string()))
}

/// Path of the default config file.
pub fn default_config_path() -> SettingsResult<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}
