//! Canvas type definitions: DrawingMode, ToolSettings and gesture state.

use vecsketch_core::{FontSpec, Handle, Point};
use vecsketch_settings::EditorSettings;

use crate::shapes::DragShape;

/// Interaction modes for the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawingMode {
    /// Freehand strokes.
    #[default]
    Draw,
    Move,
    Remove,
    Eraser,
    Rotate,
    Copy,
    Paste,
    Text,
    Circle,
    Rectangle,
    Triangle,
    Polygon,
}

impl DrawingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draw => "draw",
            Self::Move => "move",
            Self::Remove => "remove",
            Self::Eraser => "eraser",
            Self::Rotate => "rotate",
            Self::Copy => "copy",
            Self::Paste => "paste",
            Self::Text => "text",
            Self::Circle => "circle",
            Self::Rectangle => "rectangle",
            Self::Triangle => "triangle",
            Self::Polygon => "polygon",
        }
    }

    /// The press-drag-release shape this mode draws, if any.
    pub fn drag_shape(&self) -> Option<DragShape> {
        match self {
            Self::Circle => Some(DragShape::Circle),
            Self::Rectangle => Some(DragShape::Rectangle),
            Self::Triangle => Some(DragShape::Triangle),
            _ => None,
        }
    }
}

impl std::fmt::Display for DrawingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current tool parameters used when committing new primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSettings {
    pub line_width: f64,
    pub eraser_size: f64,
    pub stroke_color: String,
    pub shape_fill: String,
    /// Colors the selection can be recolored with.
    pub palette: Vec<String>,
    pub font: FontSpec,
    pub pick_tolerance: f64,
}

impl From<&EditorSettings> for ToolSettings {
    fn from(editor: &EditorSettings) -> Self {
        Self {
            line_width: editor.line_width,
            eraser_size: editor.eraser_size,
            stroke_color: editor.stroke_color.clone(),
            shape_fill: editor.shape_fill.clone(),
            palette: editor.palette.clone(),
            font: editor.font.clone(),
            pick_tolerance: editor.pick_tolerance,
        }
    }
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self::from(&EditorSettings::default())
    }
}

/// In-progress pointer gesture.
///
/// Stroke segments are registered when the gesture ends; preview primitives
/// never are.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) enum Gesture {
    #[default]
    Idle,
    Stroke {
        last: Point,
        segments: Vec<Handle>,
    },
    Moving {
        handle: Handle,
        last: Point,
    },
    Shape {
        shape: DragShape,
        start: Point,
        preview: Option<Handle>,
    },
    Polygon {
        vertices: Vec<Point>,
        edges: Vec<Handle>,
    },
    /// Text mode press; waits for the text to be supplied.
    TextAnchor(Point),
}

impl Gesture {
    /// Preview primitives drawn for this gesture.
    pub(crate) fn preview_handles(&self) -> Vec<Handle> {
        match self {
            Self::Shape { preview, .. } => preview.iter().copied().collect(),
            Self::Polygon { edges, .. } => edges.clone(),
            Self::Idle | Self::Stroke { .. } | Self::Moving { .. } | Self::TextAnchor(_) => {
                Vec::new()
            }
        }
    }
}
