//! Error types for textrude.
//!
//! This module defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`TextMeshError`].
pub type Result<T> = std::result::Result<T, TextMeshError>;

/// Errors that can occur while building or exporting text meshes.
#[derive(Error, Debug)]
pub enum TextMeshError {
    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },

    /// Vertex or index buffers are inconsistent.
    #[error("invalid mesh buffers: {0}")]
    InvalidBuffers(String),

    /// Invalid state for the requested operation.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Font data could not be read or parsed.
    #[error("font error: {0}")]
    Font(String),

    /// A glyph's contours could not be triangulated.
    #[error("failed to tessellate glyph {glyph:?}: {message}")]
    Tessellation {
        /// The glyph being tessellated.
        glyph: char,
        /// Error message from the tessellator.
        message: String,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error saving mesh to file.
    #[error("failed to save mesh to {path}: {message}")]
    SaveError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },
}

impl TextMeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        TextMeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
