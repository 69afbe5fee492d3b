//! Canvas for drawing and manipulating grouped objects.
//!
//! The canvas ties a [`RenderSurface`] to the [`ObjectRegistry`]: pointer
//! events create primitives on the surface according to the current
//! [`DrawingMode`], and each completed gesture is registered as one logical
//! object.

mod file_io;
mod operations;
mod types;

pub use operations::TEXT_SIZE_PER_WIDTH;
pub use types::{DrawingMode, ToolSettings};

use tracing::debug;
use vecsketch_core::{FontSpec, Handle, Point, Primitive, PrimitiveKind, PrimitiveStyle};
use vecsketch_settings::EditorSettings;

use crate::clipboard::Clipboard;
use crate::registry::ObjectRegistry;
use crate::scene::SceneSurface;
use crate::shapes::DragShape;
use crate::surface::RenderSurface;
use types::Gesture;

/// Canvas state: the surface, the object bookkeeping and the active tool.
#[derive(Debug)]
pub struct Canvas<S: RenderSurface = SceneSurface> {
    surface: S,
    registry: ObjectRegistry,
    clipboard: Clipboard,
    mode: DrawingMode,
    gesture: Gesture,
    tools: ToolSettings,
}

impl Canvas<SceneSurface> {
    /// Creates a new in-memory canvas with default tool settings.
    pub fn new() -> Self {
        Self::with_surface(SceneSurface::new(), ToolSettings::default())
    }

    /// Creates an in-memory canvas using the configured editor defaults.
    pub fn with_settings(editor: &EditorSettings) -> Self {
        Self::with_surface(SceneSurface::new(), ToolSettings::from(editor))
    }
}

impl Default for Canvas<SceneSurface> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RenderSurface> Canvas<S> {
    /// Creates a canvas drawing onto `surface`, which should be empty.
    pub fn with_surface(surface: S, tools: ToolSettings) -> Self {
        Self {
            surface,
            registry: ObjectRegistry::new(),
            clipboard: Clipboard::new(),
            mode: DrawingMode::default(),
            gesture: Gesture::Idle,
            tools,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn tools(&self) -> &ToolSettings {
        &self.tools
    }

    /// Number of logical objects on the canvas.
    pub fn object_count(&self) -> usize {
        self.registry.len()
    }

    /// Handle through which the current selection was picked.
    pub fn selected(&self) -> Option<Handle> {
        self.registry.selected()
    }

    /// Gets the current drawing mode.
    pub fn mode(&self) -> DrawingMode {
        self.mode
    }

    /// Sets the drawing mode, ending any gesture in progress.
    ///
    /// A stroke being drawn is kept and registered; shape and polygon
    /// previews are deleted.
    pub fn set_mode(&mut self, mode: DrawingMode) {
        self.end_gesture();
        if self.mode != mode {
            debug!(from = %self.mode, to = %mode, "Drawing mode changed");
        }
        self.mode = mode;
    }

    /// Point where text will be placed after a press in text mode.
    pub fn pending_text_anchor(&self) -> Option<Point> {
        match self.gesture {
            Gesture::TextAnchor(p) => Some(p),
            _ => None,
        }
    }

    /// Vertices of the polygon being built.
    pub fn polygon_vertices(&self) -> &[Point] {
        match &self.gesture {
            Gesture::Polygon { vertices, .. } => vertices,
            _ => &[],
        }
    }

    /// Pointer button pressed at `p`.
    pub fn on_press(&mut self, p: Point) {
        match self.mode {
            DrawingMode::Draw => {
                self.end_gesture();
                self.registry
                    .select_at(&self.surface, p, self.tools.pick_tolerance);
                self.gesture = Gesture::Stroke {
                    last: p,
                    segments: Vec::new(),
                };
            }
            DrawingMode::Move => {
                self.end_gesture();
                if let Some(handle) =
                    self.registry
                        .select_at(&self.surface, p, self.tools.pick_tolerance)
                {
                    self.gesture = Gesture::Moving { handle, last: p };
                }
            }
            DrawingMode::Remove => {
                if let Some(handle) =
                    self.registry
                        .select_at(&self.surface, p, self.tools.pick_tolerance)
                {
                    self.registry.remove_group(&mut self.surface, handle);
                }
            }
            DrawingMode::Eraser => {
                self.erase_at(p);
            }
            DrawingMode::Rotate => {
                self.rotate_at(p);
            }
            DrawingMode::Copy => {
                self.copy_at(p);
            }
            DrawingMode::Paste => {
                self.paste_at(p);
            }
            DrawingMode::Text => {
                self.gesture = Gesture::TextAnchor(p);
            }
            DrawingMode::Circle | DrawingMode::Rectangle | DrawingMode::Triangle => {
                self.end_gesture();
                if let Some(shape) = self.mode.drag_shape() {
                    self.gesture = Gesture::Shape {
                        shape,
                        start: p,
                        preview: None,
                    };
                }
            }
            DrawingMode::Polygon => self.add_polygon_vertex(p),
        }
    }

    /// Pointer moved to `p` with the button held.
    pub fn on_drag(&mut self, p: Point) {
        if self.mode == DrawingMode::Eraser {
            self.erase_at(p);
            return;
        }

        match &mut self.gesture {
            Gesture::Stroke { last, segments } => {
                let style = PrimitiveStyle::new(self.tools.stroke_color.clone(), self.tools.line_width);
                let segment = Primitive::line(vec![last.x, last.y, p.x, p.y], style);
                segments.push(self.surface.create_primitive(segment));
                *last = p;
            }
            Gesture::Moving { handle, last } => {
                self.registry
                    .move_group(&mut self.surface, *handle, p.x - last.x, p.y - last.y);
                *last = p;
            }
            Gesture::Shape {
                shape,
                start,
                preview,
            } => {
                if let Some(old) = preview.take() {
                    self.surface.delete_primitive(old);
                }
                let primitive = shape_primitive(*shape, *start, p, &self.tools);
                *preview = Some(self.surface.create_primitive(primitive));
            }
            Gesture::Idle | Gesture::Polygon { .. } | Gesture::TextAnchor(_) => {}
        }
    }

    /// Pointer button released at `p`.
    pub fn on_release(&mut self, p: Point) {
        match std::mem::take(&mut self.gesture) {
            Gesture::Shape {
                shape,
                start,
                preview,
            } => {
                if let Some(old) = preview {
                    self.surface.delete_primitive(old);
                }
                let primitive = shape_primitive(shape, start, p, &self.tools);
                let handle = self.surface.create_primitive(primitive);
                let group = self.registry.register(vec![handle]);
                debug!(group = %group, kind = %shape.kind(), "Committed shape");
            }
            // Polygons and pending text outlive the release.
            gesture @ (Gesture::Polygon { .. } | Gesture::TextAnchor(_)) => {
                self.gesture = gesture;
            }
            gesture => {
                self.gesture = gesture;
                self.end_gesture();
            }
        }
    }

    /// Double click at `p`; closes the polygon being built.
    pub fn on_double_click(&mut self, _p: Point) {
        if self.mode == DrawingMode::Polygon {
            self.finish_polygon();
        }
    }

    /// Places a text object anchored at `p`, using the tool font and stroke
    /// color unless others are given.
    pub fn place_text(
        &mut self,
        p: Point,
        text: &str,
        font: Option<FontSpec>,
        color: Option<&str>,
    ) -> Handle {
        if matches!(self.gesture, Gesture::TextAnchor(_)) {
            self.gesture = Gesture::Idle;
        }
        let style = PrimitiveStyle::new(color.unwrap_or(self.tools.stroke_color.as_str()), 0.0)
            .with_font(font.unwrap_or_else(|| self.tools.font.clone()));
        let handle = self
            .surface
            .create_primitive(Primitive::text(p, text, style));
        let group = self.registry.register(vec![handle]);
        debug!(group = %group, chars = text.chars().count(), "Placed text");
        handle
    }

    /// Adds a vertex to the polygon being built, drawing a preview edge
    /// from the previous vertex.
    pub fn add_polygon_vertex(&mut self, p: Point) {
        if !matches!(self.gesture, Gesture::Polygon { .. }) {
            self.end_gesture();
            self.gesture = Gesture::Polygon {
                vertices: Vec::new(),
                edges: Vec::new(),
            };
        }
        if let Gesture::Polygon { vertices, edges } = &mut self.gesture {
            if let Some(prev) = vertices.last() {
                let style = PrimitiveStyle::new(self.tools.shape_fill.clone(), self.tools.line_width);
                let edge = Primitive::line(vec![prev.x, prev.y, p.x, p.y], style);
                edges.push(self.surface.create_primitive(edge));
            }
            vertices.push(p);
        }
    }

    /// Commits the polygon being built if it has more than two vertices.
    /// The preview edges are deleted and the vertex list reset either way.
    pub fn finish_polygon(&mut self) -> Option<Handle> {
        if !matches!(self.gesture, Gesture::Polygon { .. }) {
            return None;
        }
        let Gesture::Polygon { vertices, edges } = std::mem::take(&mut self.gesture) else {
            return None;
        };
        for edge in edges {
            self.surface.delete_primitive(edge);
        }
        if vertices.len() < 3 {
            debug!(vertices = vertices.len(), "Polygon discarded");
            return None;
        }

        let style = PrimitiveStyle::new(self.tools.shape_fill.clone(), self.tools.line_width);
        let coords = vecsketch_core::geometry::flatten(vertices);
        let handle = self
            .surface
            .create_primitive(Primitive::new(PrimitiveKind::Polygon, coords, style));
        let group = self.registry.register(vec![handle]);
        debug!(group = %group, "Committed polygon");
        Some(handle)
    }

    /// Finishes whatever gesture is in progress.
    fn end_gesture(&mut self) {
        let gesture = std::mem::take(&mut self.gesture);
        if let Gesture::Stroke { segments, .. } = &gesture {
            if !segments.is_empty() {
                let group = self.registry.register(segments.clone());
                debug!(group = %group, segments = segments.len(), "Committed stroke");
            }
            return;
        }
        for handle in gesture.preview_handles() {
            self.surface.delete_primitive(handle);
        }
    }
}

fn shape_primitive(shape: DragShape, start: Point, current: Point, tools: &ToolSettings) -> Primitive {
    Primitive::new(
        shape.kind(),
        shape.coords(start, current),
        PrimitiveStyle::new(tools.shape_fill.clone(), tools.line_width),
    )
}
