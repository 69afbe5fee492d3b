//! Error handling for vecsketch
//!
//! Lookup misses on the object registry are not errors: they come back as
//! `None` and callers treat them as no-ops. The types here cover the failures
//! a user can actually run into, which today means reading and writing
//! drawing files.
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Drawing file error type
///
/// Loading is all-or-nothing, so any of these aborts a load before the
/// current drawing is touched.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The file could not be read or written
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON, or does not have the drawing layout
    #[error("Malformed drawing file: {0}")]
    Json(#[from] serde_json::Error),

    /// One entry parsed but describes impossible geometry
    #[error("Invalid object at index {index}: {reason}")]
    InvalidRecord {
        /// Position of the entry in the file's array.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },
}

impl PersistenceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            index,
            reason: reason.into(),
        }
    }
}
