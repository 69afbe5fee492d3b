//! Serialization and deserialization for drawing files.
//!
//! A drawing is stored as a JSON array with one entry per logical object:
//!
//! ```json
//! [
//!   {"type": "line", "coords": [0, 0, 10, 10, 10, 10, 20, 5], "width": 2, "fill": "black"},
//!   {"type": "oval", "coords": [40, 40, 60, 60], "width": 1, "fill": "red", "outline": ""},
//!   {"type": "text", "coords": [100, 20], "width": 0, "fill": "blue",
//!    "text": "hi", "font": {"family": "Arial", "size": 16}}
//! ]
//! ```
//!
//! A freehand stroke is flattened into a single `"line"` entry whose
//! coordinates run through every segment, so a reloaded drawing has one
//! single-primitive group per entry.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};
use vecsketch_core::{FontSpec, PersistenceError, Primitive, PrimitiveKind, PrimitiveStyle};

use crate::registry::ObjectRegistry;
use crate::surface::RenderSurface;

/// Font entry of a text object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontRecord {
    pub family: String,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub size: f64,
}

/// One entry of a drawing file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    #[serde(rename = "type")]
    pub kind: PrimitiveKind,
    pub coords: Vec<f64>,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub width: f64,
    pub fill: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<FontRecord>,
}

impl ObjectRecord {
    /// Describes a single primitive.
    pub fn from_primitive(primitive: &Primitive) -> Self {
        let kind = primitive.kind;
        let style = &primitive.style;
        let is_text = kind == PrimitiveKind::Text;
        Self {
            kind,
            coords: primitive.coords.clone(),
            width: style.width,
            fill: style.fill.clone(),
            outline: kind.has_outline().then(|| style.outline.clone()),
            text: if is_text { primitive.text.clone() } else { None },
            font: if is_text {
                style.font.as_ref().map(|f| FontRecord {
                    family: f.family.clone(),
                    size: f.size,
                })
            } else {
                None
            },
        }
    }

    /// The primitive this entry describes. Call [`validate`](Self::validate)
    /// first; this does not check geometry.
    pub fn to_primitive(&self) -> Primitive {
        let mut style = PrimitiveStyle::new(self.fill.clone(), self.width)
            .with_outline(self.outline.clone().unwrap_or_default());
        if let Some(font) = &self.font {
            style = style.with_font(FontSpec::new(font.family.clone(), font.size));
        }
        Primitive {
            kind: self.kind,
            coords: self.coords.clone(),
            style,
            text: self.text.clone(),
        }
    }

    /// Checks that the entry describes drawable geometry.
    pub fn validate(&self, index: usize) -> Result<(), PersistenceError> {
        if self.coords.len() % 2 != 0 {
            return Err(PersistenceError::invalid(
                index,
                format!("odd number of coordinates ({})", self.coords.len()),
            ));
        }
        if self.coords.iter().any(|c| !c.is_finite()) {
            return Err(PersistenceError::invalid(index, "non-finite coordinate"));
        }
        let points = self.coords.len() / 2;
        if !self.kind.accepts_point_count(points) {
            return Err(PersistenceError::invalid(
                index,
                format!("{} cannot have {} point(s)", self.kind, points),
            ));
        }
        if !(self.width.is_finite() && self.width >= 0.0) {
            return Err(PersistenceError::invalid(
                index,
                format!("invalid width {}", self.width),
            ));
        }
        if self.kind == PrimitiveKind::Text {
            if self.text.is_none() {
                return Err(PersistenceError::invalid(index, "text object without text"));
            }
            match &self.font {
                None => return Err(PersistenceError::invalid(index, "text object without font")),
                Some(font) if !(font.size.is_finite() && font.size > 0.0) => {
                    return Err(PersistenceError::invalid(
                        index,
                        format!("invalid font size {}", font.size),
                    ))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// Complete drawing file: the ordered list of objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawingFile {
    pub objects: Vec<ObjectRecord>,
}

impl DrawingFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Describes every registered object, in creation order.
    ///
    /// A group made of line segments becomes one line entry through all of
    /// its segments, styled like its first segment. Any other group is
    /// written primitive by primitive.
    pub fn from_canvas<S: RenderSurface + ?Sized>(registry: &ObjectRegistry, surface: &S) -> Self {
        let mut objects = Vec::with_capacity(registry.len());
        for group in registry.groups() {
            let primitives: Vec<&Primitive> = group
                .handles()
                .iter()
                .filter_map(|h| surface.primitive(*h))
                .collect();
            let Some(first) = primitives.first() else {
                warn!(group = %group.id(), "Group has no live primitives, skipping");
                continue;
            };

            if primitives.iter().all(|p| p.kind == PrimitiveKind::Line) {
                let mut record = ObjectRecord::from_primitive(first);
                record.coords = primitives
                    .iter()
                    .flat_map(|p| p.coords.iter().copied())
                    .collect();
                objects.push(record);
            } else {
                objects.extend(primitives.iter().map(|p| ObjectRecord::from_primitive(p)));
            }
        }
        Self { objects }
    }

    /// Replaces everything on the surface and in the registry with this
    /// drawing, one single-primitive group per entry.
    pub fn restore<S: RenderSurface + ?Sized>(
        &self,
        registry: &mut ObjectRegistry,
        surface: &mut S,
    ) {
        surface.clear();
        registry.clear();
        for record in &self.objects {
            let handle = surface.create_primitive(record.to_primitive());
            registry.register(vec![handle]);
        }
    }

    /// Validates every entry, reporting the first bad one.
    pub fn validate(&self) -> Result<(), PersistenceError> {
        self.objects
            .iter()
            .enumerate()
            .try_for_each(|(i, record)| record.validate(i))
    }

    /// Parses and validates a drawing.
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        let design: DrawingFile = serde_json::from_str(json).map_err(|e| {
            warn!(error = %e, "Rejected malformed drawing");
            PersistenceError::from(e)
        })?;
        if let Err(e) = design.validate() {
            warn!(error = %e, "Rejected drawing entry");
            return Err(e);
        }
        Ok(design)
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save drawing to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| PersistenceError::io(path, e))?;
        info!(path = %path.display(), objects = self.objects.len(), "Saved drawing");
        Ok(())
    }

    /// Load drawing from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| PersistenceError::io(path, e))?;
        let design = Self::from_json(&content)?;
        info!(path = %path.display(), objects = design.objects.len(), "Loaded drawing");
        Ok(design)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// Accepts `2`, `2.5` and also `"2.0"`, which is how Tk-style canvases
/// report option values.
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected a number, got {:?}", s))),
    }
}
