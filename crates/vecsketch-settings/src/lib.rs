//! vecsketch Settings Crate
//!
//! Handles application configuration: drawing tool defaults, canvas window
//! settings and the recent files list. Supports JSON and TOML file formats
//! stored in the platform-specific config directory.

pub mod config;
pub mod error;

pub use config::{
    config_dir, default_config_path, CanvasSettings, Config, EditorSettings, MAX_RECENT_FILES,
};
pub use error::{SettingsError, SettingsResult};
