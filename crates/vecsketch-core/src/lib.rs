//! # vecsketch Core
//!
//! Core types shared by the vecsketch crates:
//! - [`Handle`]: opaque identifier of one primitive on the rendering surface
//! - [`Primitive`], [`PrimitiveKind`], [`PrimitiveStyle`]: what a surface draws
//! - [`Point`], [`Bounds`] and coordinate helpers (translation, rotation, centroid)
//! - Error types for persistence

pub mod error;
pub mod geometry;
pub mod handle;
pub mod primitive;

pub use error::PersistenceError;
pub use geometry::{Bounds, Point};
pub use handle::Handle;
pub use primitive::{FontSpec, Primitive, PrimitiveKind, PrimitiveStyle, StyleUpdate};
