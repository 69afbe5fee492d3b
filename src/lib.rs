//! # vecsketch
//!
//! A vector sketching editor core: freehand strokes, circles, squares,
//! triangles, polygons and text on a retained-mode canvas, with selection,
//! move, rotate, recolor, erase, copy/paste and JSON drawing files.
//!
//! ## Architecture
//!
//! vecsketch is organized as a workspace with multiple crates:
//!
//! 1. **vecsketch-core** - Handles, primitives, styles, geometry, errors
//! 2. **vecsketch-settings** - Editor and canvas configuration (JSON/TOML)
//! 3. **vecsketch-designer** - Object registry, rendering surface, canvas tools, drawing files
//! 4. **vecsketch** - Main binary that integrates all crates

use std::path::{Path, PathBuf};

use tracing::{info, warn};

pub use vecsketch_core::{
    Bounds, FontSpec, Handle, PersistenceError, Point, Primitive, PrimitiveKind, PrimitiveStyle,
    StyleUpdate,
};
pub use vecsketch_designer as designer;
pub use vecsketch_designer::{
    Canvas, DrawingFile, DrawingMode, ObjectRegistry, RenderSurface, SceneSurface, ToolSettings,
};
pub use vecsketch_settings::{CanvasSettings, Config, EditorSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Loads the configuration at `path`, writing the defaults there on first
/// run.
pub fn load_config(path: &Path) -> Config {
    if path.exists() {
        return Config::load_or_default(path);
    }
    let config = Config::default();
    if let Err(e) = config.save_to_file(path) {
        warn!(path = %path.display(), error = %e, "Could not write default config");
    }
    config
}

/// Builds the editor canvas from `config`, reopening the most recent
/// drawing when there is one.
///
/// A recent drawing that no longer loads is skipped with a warning; the
/// canvas then starts empty.
pub fn open_canvas(config: &Config) -> Canvas {
    let mut canvas = Canvas::with_settings(&config.editor);
    reopen_last_file(&mut canvas, config);
    canvas
}

/// Loads the most recent drawing into `canvas`, returning its path on
/// success.
fn reopen_last_file(canvas: &mut Canvas, config: &Config) -> Option<PathBuf> {
    let last = config.last_file()?;
    match canvas.load_from_file(last) {
        Ok(objects) => {
            info!(path = %last.display(), objects, "Reopened last drawing");
            Some(last.to_path_buf())
        }
        Err(e) => {
            let reason = format!("{:#}", e);
            warn!(path = %last.display(), error = %reason, "Could not reopen last drawing");
            None
        }
    }
}

/// A canvas together with the configuration it was opened with.
///
/// Drawings saved or opened through the editor are remembered as the most
/// recent file, so the next start reopens them.
#[derive(Debug)]
pub struct Editor {
    canvas: Canvas,
    config: Config,
    config_path: PathBuf,
    current_file: Option<PathBuf>,
}

impl Editor {
    /// Loads the configuration at `config_path` and opens the canvas it
    /// describes.
    pub fn open(config_path: impl Into<PathBuf>) -> Self {
        let config_path = config_path.into();
        let config = load_config(&config_path);
        let mut canvas = Canvas::with_settings(&config.editor);
        let current_file = reopen_last_file(&mut canvas, &config);
        Self {
            canvas,
            config,
            config_path,
            current_file,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The drawing last saved or opened in this session.
    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    /// Saves the drawing to `path` and records it as the most recent file.
    pub fn save_drawing(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        self.canvas.save_to_file(path)?;
        self.remember(path);
        Ok(())
    }

    /// Replaces the drawing with the one at `path` and records it as the
    /// most recent file. Returns the number of objects loaded.
    pub fn open_drawing(&mut self, path: impl AsRef<Path>) -> anyhow::Result<usize> {
        let path = path.as_ref();
        let objects = self.canvas.load_from_file(path)?;
        self.remember(path);
        Ok(objects)
    }

    fn remember(&mut self, path: &Path) {
        self.current_file = Some(path.to_path_buf());
        self.config.add_recent_file(path);
        if let Err(e) = self.config.save_to_file(&self.config_path) {
            warn!(path = %self.config_path.display(), error = %e, "Could not update recent files");
        }
    }
}
