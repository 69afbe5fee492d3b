//! Renderable primitives and their styles.

use serde::{Deserialize, Serialize};

use crate::geometry::{self, Bounds, Point};

/// The fixed set of primitive kinds a rendering surface can draw.
///
/// Triangles and circles are not kinds of their own: a committed triangle is
/// a three-point [`PrimitiveKind::Polygon`] and a circle an
/// [`PrimitiveKind::Oval`] with a square bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Line,
    Oval,
    Rectangle,
    Polygon,
    Text,
}

impl PrimitiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Oval => "oval",
            Self::Rectangle => "rectangle",
            Self::Polygon => "polygon",
            Self::Text => "text",
        }
    }

    /// Whether `points` coordinate pairs form valid geometry for this kind.
    pub fn accepts_point_count(&self, points: usize) -> bool {
        match self {
            Self::Line => points >= 2,
            Self::Oval | Self::Rectangle => points == 2,
            Self::Polygon => points >= 3,
            Self::Text => points == 1,
        }
    }

    /// Kinds that are drawn with a separate outline color.
    pub fn has_outline(&self) -> bool {
        matches!(self, Self::Oval | Self::Rectangle | Self::Polygon)
    }
}

impl std::fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Font of a text primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size: f64,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new("Arial", 16.0)
    }
}

/// Visual style of a primitive.
///
/// Colors are kept as the strings the surface understands (`"black"`,
/// `"#ff0000"`); an empty string means "not painted".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveStyle {
    pub fill: String,
    #[serde(default)]
    pub outline: String,
    pub width: f64,
    #[serde(default)]
    pub font: Option<FontSpec>,
}

impl PrimitiveStyle {
    pub fn new(fill: impl Into<String>, width: f64) -> Self {
        Self {
            fill: fill.into(),
            outline: String::new(),
            width,
            font: None,
        }
    }

    pub fn with_outline(mut self, outline: impl Into<String>) -> Self {
        self.outline = outline.into();
        self
    }

    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = Some(font);
        self
    }

    /// Overwrites the fields that `update` sets.
    pub fn apply(&mut self, update: &StyleUpdate) {
        if let Some(fill) = &update.fill {
            self.fill = fill.clone();
        }
        if let Some(width) = update.width {
            self.width = width;
        }
        if let (Some(size), Some(font)) = (update.font_size, self.font.as_mut()) {
            font.size = size;
        }
    }
}

impl Default for PrimitiveStyle {
    fn default() -> Self {
        Self::new("black", 1.0)
    }
}

/// A partial style change applied uniformly to every primitive of a group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleUpdate {
    pub fill: Option<String>,
    pub width: Option<f64>,
    /// Only affects primitives that carry a font.
    pub font_size: Option<f64>,
}

impl StyleUpdate {
    pub fn fill(color: impl Into<String>) -> Self {
        Self {
            fill: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn width(width: f64) -> Self {
        Self {
            width: Some(width),
            ..Self::default()
        }
    }

    pub fn font_size(size: f64) -> Self {
        Self {
            font_size: Some(size),
            ..Self::default()
        }
    }
}

/// Everything a surface needs to draw one primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    /// Flat `[x0, y0, x1, y1, ...]` list.
    pub coords: Vec<f64>,
    pub style: PrimitiveStyle,
    #[serde(default)]
    pub text: Option<String>,
}

impl Primitive {
    pub fn new(kind: PrimitiveKind, coords: Vec<f64>, style: PrimitiveStyle) -> Self {
        Self {
            kind,
            coords,
            style,
            text: None,
        }
    }

    pub fn line(coords: Vec<f64>, style: PrimitiveStyle) -> Self {
        Self::new(PrimitiveKind::Line, coords, style)
    }

    pub fn text(anchor: Point, text: impl Into<String>, style: PrimitiveStyle) -> Self {
        Self {
            kind: PrimitiveKind::Text,
            coords: vec![anchor.x, anchor.y],
            style,
            text: Some(text.into()),
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        geometry::coords_bounds(&self.coords)
    }
}
