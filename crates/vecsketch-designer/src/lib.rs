//! # vecsketch Designer
//!
//! This crate provides the drawing canvas: freehand strokes, basic shapes,
//! text, selection and editing of drawn objects, copy/paste and JSON
//! drawing files.
//!
//! ## Core Components
//!
//! - **Registry**: which primitives make up which logical object, and the
//!   current selection
//! - **Surface**: the retained-mode canvas the primitives live on, behind
//!   the [`RenderSurface`] trait, with an in-memory [`SceneSurface`]
//! - **Canvas**: drawing modes and pointer gestures
//! - **Clipboard**: single-slot copy/paste
//! - **Serialization**: the JSON drawing format
//!
//! ## Architecture
//!
//! ```text
//! Canvas (modes, gestures, commands)
//!   ├── ObjectRegistry (groups, selection)
//!   ├── Clipboard
//!   └── RenderSurface (primitives, hit-testing)
//! ```
//!
//! A freehand stroke is many line primitives but one logical object: moving,
//! recoloring, removing or copying any segment acts on the whole stroke.

pub mod canvas;
pub mod clipboard;
pub mod registry;
pub mod scene;
pub mod serialization;
pub mod shapes;
pub mod surface;

pub use canvas::{Canvas, DrawingMode, ToolSettings, TEXT_SIZE_PER_WIDTH};
pub use clipboard::{Clipboard, CopiedObject};
pub use registry::{Group, GroupId, ObjectRegistry};
pub use scene::SceneSurface;
pub use serialization::{DrawingFile, FontRecord, ObjectRecord};
pub use shapes::DragShape;
pub use surface::RenderSurface;

pub use vecsketch_core::{
    Bounds, FontSpec, Handle, Point, Primitive, PrimitiveKind, PrimitiveStyle, StyleUpdate,
};
