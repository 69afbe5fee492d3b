//! File I/O operations (save, load) for the canvas.

use anyhow::Context;
use std::path::Path;

use super::types::Gesture;
use super::Canvas;
use crate::serialization::DrawingFile;
use crate::surface::RenderSurface;

impl<S: RenderSurface> Canvas<S> {
    /// Snapshot of the drawing in file form.
    pub fn to_drawing(&self) -> DrawingFile {
        DrawingFile::from_canvas(&self.registry, &self.surface)
    }

    /// Save drawing to file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        self.to_drawing()
            .save_to_file(path)
            .with_context(|| format!("failed to save drawing to {}", path.display()))
    }

    /// Load drawing from file, replacing the current one.
    ///
    /// The file is read and validated completely before anything on the
    /// canvas changes; on error the current drawing is untouched. Returns
    /// the number of objects loaded.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<usize> {
        let path = path.as_ref();
        let design = DrawingFile::load_from_file(path)
            .with_context(|| format!("failed to load drawing from {}", path.display()))?;

        self.gesture = Gesture::Idle;
        design.restore(&mut self.registry, &mut self.surface);
        Ok(design.objects.len())
    }
}
