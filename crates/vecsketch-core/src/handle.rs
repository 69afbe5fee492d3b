//! Primitive handles.

use serde::{Deserialize, Serialize};

/// Identifier of one renderable primitive, issued by the rendering surface
/// when the primitive is created.
///
/// The value carries no meaning of its own: it is only compared, hashed and
/// stored. Two surfaces may issue the same value for different primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(pub u64);

impl Handle {
    /// Returns the raw surface identifier.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
